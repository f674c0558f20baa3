use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "skillspace-lms",
    version,
    about = "SkillSpace data access service and client"
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// 启动 HTTP 服务（默认）
    Serve,
    /// 发出一次请求并打印响应信封
    Request(RequestArgs),
    /// 打印解析后的配置
    Config,
    /// 管理本地会话
    Session(SessionArgs),
}

#[derive(Debug, Clone, Args)]
pub(crate) struct RequestArgs {
    #[arg(help = "HTTP method, e.g. GET or POST")]
    pub method: String,

    #[arg(help = "Endpoint relative to the API base, e.g. /courses")]
    pub endpoint: String,

    #[arg(long, help = "JSON request body")]
    pub body: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub(crate) struct SessionArgs {
    #[command(subcommand)]
    pub action: SessionAction,
}

#[derive(Debug, Clone, Subcommand)]
pub(crate) enum SessionAction {
    Show,
    SignIn { user_id: String },
    SignOut,
    Complete { activity_id: String },
    Uncomplete { activity_id: String },
    /// 计算课程进度
    Progress { course_id: String },
}

impl Cli {
    pub fn is_serve(&self) -> bool {
        matches!(self.command, None | Some(Commands::Serve))
    }
}
