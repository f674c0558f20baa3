use serde::{Deserialize, Serialize};

use super::entities::UserProfile;

/// 更新用户请求，资料字段逐项合并
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<UserProfile>,
}

impl UserProfile {
    /// 用 `update` 中出现的字段覆盖当前资料
    pub fn merge(&mut self, update: UserProfile) {
        if update.bio.is_some() {
            self.bio = update.bio;
        }
        if update.department.is_some() {
            self.department = update.department;
        }
        if update.phone.is_some() {
            self.phone = update.phone;
        }
        if update.address.is_some() {
            self.address = update.address;
        }
    }
}
