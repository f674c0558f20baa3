//! 顺序维护
//!
//! 章节和活动的 `order` 字段始终等于其在列表中从 1 开始的位置。
//! 这里的函数同时服务于编辑器的本地副本和 fixture 数据源。

use crate::models::activities::entities::Activity;
use crate::models::sections::entities::CourseSection;

/// 带稳定 ID 和顺序号的条目
pub trait Ordered {
    fn id(&self) -> &str;
    fn order(&self) -> u32;
    fn set_order(&mut self, order: u32);
}

impl Ordered for CourseSection {
    fn id(&self) -> &str {
        &self.id
    }

    fn order(&self) -> u32 {
        self.order
    }

    fn set_order(&mut self, order: u32) {
        self.order = order;
    }
}

impl Ordered for Activity {
    fn id(&self) -> &str {
        &self.id
    }

    fn order(&self) -> u32 {
        self.order
    }

    fn set_order(&mut self, order: u32) {
        self.order = order;
    }
}

/// 按位置重写 `order`
pub fn renumber<T: Ordered>(items: &mut [T]) {
    for (index, item) in items.iter_mut().enumerate() {
        item.set_order(index as u32 + 1);
    }
}

/// 先按现有 `order` 稳定排序，再重新编号
pub fn normalize<T: Ordered>(items: &mut [T]) {
    items.sort_by_key(|item| item.order());
    renumber(items);
}

pub fn position_of<T: Ordered>(items: &[T], id: &str) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}

pub fn is_dense<T: Ordered>(items: &[T]) -> bool {
    items
        .iter()
        .enumerate()
        .all(|(index, item)| item.order() as usize == index + 1)
}

/// 请求里的 1 起始 `order` 转为插入下标
pub fn index_from_order(order: Option<u32>) -> Option<usize> {
    order.map(|o| o.saturating_sub(1) as usize)
}

/// 拖放语义：移除被拖动项，再插入到目标项原来的下标
///
/// 任一 ID 不存在或两者相同时不做任何修改并返回 `false`。
pub fn move_onto<T: Ordered>(items: &mut Vec<T>, dragged_id: &str, target_id: &str) -> bool {
    let (Some(from), Some(to)) = (position_of(items, dragged_id), position_of(items, target_id))
    else {
        return false;
    };
    if from == to {
        return false;
    }
    let item = items.remove(from);
    items.insert(to, item);
    renumber(items);
    true
}

/// 移到指定下标，越界时放到末尾
pub fn move_to_index<T: Ordered>(items: &mut Vec<T>, id: &str, index: usize) -> bool {
    let Some(from) = position_of(items, id) else {
        return false;
    };
    let item = items.remove(from);
    let index = index.min(items.len());
    items.insert(index, item);
    renumber(items);
    true
}

/// 插入条目，`index` 缺省或越界时追加；返回实际下标
pub fn insert_at<T: Ordered>(items: &mut Vec<T>, item: T, index: Option<usize>) -> usize {
    let index = index.map_or(items.len(), |i| i.min(items.len()));
    items.insert(index, item);
    renumber(items);
    index
}

/// 删除条目并让剩余条目保持连续
pub fn remove<T: Ordered>(items: &mut Vec<T>, id: &str) -> Option<T> {
    let index = position_of(items, id)?;
    let item = items.remove(index);
    renumber(items);
    Some(item)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: String,
        order: u32,
    }

    impl Ordered for Item {
        fn id(&self) -> &str {
            &self.id
        }

        fn order(&self) -> u32 {
            self.order
        }

        fn set_order(&mut self, order: u32) {
            self.order = order;
        }
    }

    fn items(n: usize) -> Vec<Item> {
        (1..=n)
            .map(|i| Item {
                id: format!("item-{i}"),
                order: i as u32,
            })
            .collect()
    }

    fn ids(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    fn assert_dense_permutation(items: &[Item], n: usize) {
        assert!(is_dense(items));
        let mut orders: Vec<u32> = items.iter().map(|i| i.order).collect();
        orders.sort_unstable();
        assert_eq!(orders, (1..=n as u32).collect::<Vec<_>>());
    }

    #[test]
    fn test_move_onto_later_target_lands_after_it() {
        let mut list = items(4);
        assert!(move_onto(&mut list, "item-1", "item-3"));
        assert_eq!(ids(&list), ["item-2", "item-3", "item-1", "item-4"]);
        assert_dense_permutation(&list, 4);
    }

    #[test]
    fn test_move_onto_earlier_target_lands_before_it() {
        let mut list = items(4);
        assert!(move_onto(&mut list, "item-4", "item-2"));
        assert_eq!(ids(&list), ["item-1", "item-4", "item-2", "item-3"]);
    }

    #[test]
    fn test_move_onto_adjacent_pair_swaps() {
        let mut list = items(2);
        assert!(move_onto(&mut list, "item-1", "item-2"));
        assert_eq!(ids(&list), ["item-2", "item-1"]);
        assert_eq!(list[0].order, 1);
        assert_eq!(list[1].order, 2);
    }

    #[test]
    fn test_move_onto_every_pair_keeps_orders_dense() {
        for n in 1..=6 {
            for from in 1..=n {
                for to in 1..=n {
                    let mut list = items(n);
                    move_onto(&mut list, &format!("item-{from}"), &format!("item-{to}"));
                    assert_dense_permutation(&list, n);
                    assert_eq!(list.len(), n);
                }
            }
        }
    }

    #[test]
    fn test_move_onto_unknown_or_same_id_is_noop() {
        let mut list = items(3);
        assert!(!move_onto(&mut list, "item-1", "item-1"));
        assert!(!move_onto(&mut list, "missing", "item-1"));
        assert_eq!(list, items(3));
    }

    #[test]
    fn test_insert_and_remove_keep_orders_dense() {
        let mut list = items(3);
        let extra = Item {
            id: "extra".into(),
            order: 0,
        };
        assert_eq!(insert_at(&mut list, extra.clone(), Some(1)), 1);
        assert_eq!(ids(&list), ["item-1", "extra", "item-2", "item-3"]);
        assert_dense_permutation(&list, 4);

        assert_eq!(insert_at(&mut list, extra, Some(99)), 4);
        assert_dense_permutation(&list, 5);

        assert!(remove(&mut list, "item-1").is_some());
        assert!(remove(&mut list, "missing").is_none());
        assert_dense_permutation(&list, 4);
    }

    #[test]
    fn test_normalize_repairs_gaps() {
        let mut list = vec![
            Item {
                id: "b".into(),
                order: 7,
            },
            Item {
                id: "a".into(),
                order: 2,
            },
        ];
        normalize(&mut list);
        assert_eq!(ids(&list), ["a", "b"]);
        assert!(is_dense(&list));
    }

    #[test]
    fn test_index_from_order_is_one_based() {
        assert_eq!(index_from_order(Some(1)), Some(0));
        assert_eq!(index_from_order(Some(0)), Some(0));
        assert_eq!(index_from_order(None), None);
    }
}
