use std::process::ExitCode;

use actix_cors::Cors;
use actix_web::middleware::{Compress, DefaultHeaders};
use actix_web::{App, HttpServer, web};
use clap::Parser;
use dotenv::dotenv;
use human_panic::setup_panic;
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, warn};

// 从 lib.rs 导入模块
use skillspace_lms::client::{ApiClient, RequestOptions};
use skillspace_lms::config::AppConfig;
use skillspace_lms::errors::LmsError;
use skillspace_lms::models::ApiResponse;
use skillspace_lms::routes;
use skillspace_lms::runtime::lifetime;
use skillspace_lms::session::SessionStore;

mod cli;

use cli::{Cli, Commands, RequestArgs, SessionAction};

#[actix_web::main]
async fn main() -> std::io::Result<ExitCode> {
    dotenv().ok();

    // 记录程序启动时间
    let start_datetime = chrono::Utc::now();

    // 启动前预处理 //

    // 初始化配置
    setup_panic!();
    let cli = Cli::parse();
    AppConfig::init().expect("Failed to initialize configuration");
    let config = AppConfig::get();

    // 初始化日志；非服务命令把日志写到 stderr，stdout 只留给输出
    let (non_blocking_writer, _guard) = if cli.is_serve() {
        tracing_appender::non_blocking(std::io::stdout())
    } else {
        tracing_appender::non_blocking(std::io::stderr())
    };
    let filter = tracing_subscriber::EnvFilter::new(&config.app.log_level);
    let tracing_format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_ansi(true);

    let tracing_builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking_writer)
        .event_format(tracing_format);

    if config.is_development() {
        tracing_builder
            .with_file(true)
            .with_line_number(true)
            .init();
    } else {
        tracing_builder.json().init();
    }

    let startup = match lifetime::startup::prepare_startup(config) {
        Ok(startup) => startup,
        Err(e) => {
            eprintln!("{}", e.format_simple());
            return Ok(ExitCode::FAILURE);
        }
    };

    // 输出预处理时间
    debug!(
        "Pre-startup processing completed in {} ms",
        chrono::Utc::now()
            .signed_duration_since(start_datetime)
            .num_milliseconds()
    );

    // 预处理完成 //

    match cli.command {
        None | Some(Commands::Serve) => serve(config, startup.client).await,
        Some(Commands::Request(args)) => request(&startup.client, args).await,
        Some(Commands::Config) => {
            println!("mode: {}", startup.client.mode());
            println!("{}", serde_json::to_string_pretty(config)?);
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Session(args)) => {
            session(&startup.client, startup.session, args.action).await
        }
    }
}

async fn serve(config: &'static AppConfig, client: ApiClient) -> std::io::Result<ExitCode> {
    // 打印信息
    warn!(
        "Starting server...
        Project: {}
        Version: {}
        Data source: {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        client.source_name()
    );
    warn!("Using {} CPU cores for the server", config.server.workers);

    let client = web::Data::new(client);

    // Start the HTTP server
    let server = HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(config.cors.max_age),
            )
            .wrap(Compress::default())
            .wrap(DefaultHeaders::new().add(("Cache-Control", "no-cache, no-store, must-revalidate")))
            .app_data(client.clone())
            .configure(routes::configure_system_routes) // 配置健康检查路由
            .configure(routes::api_routes(&config.server.api_prefix)) // 配置数据源转发路由
    })
    .workers(config.server.workers);

    let bind_address = config.server_bind_address();
    warn!("Starting server at http://{}", bind_address);
    let server = server.bind(bind_address)?.run();

    tokio::select! {
        res = server => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown() => {
            warn!("Graceful shutdown: all tasks completed");
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_envelope<T: serde::Serialize>(envelope: &ApiResponse<T>) -> std::io::Result<ExitCode> {
    println!("{}", serde_json::to_string_pretty(envelope)?);
    Ok(if envelope.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn request(client: &ApiClient, args: RequestArgs) -> std::io::Result<ExitCode> {
    let Ok(method) = Method::from_bytes(args.method.to_uppercase().as_bytes()) else {
        let err = LmsError::validation(format!("Unsupported method: {}", args.method));
        return print_envelope(&ApiResponse::<()>::failure(&err));
    };

    let mut options = RequestOptions::new(method);
    if let Some(raw) = args.body {
        match serde_json::from_str::<Value>(&raw) {
            Ok(body) => options = options.with_body(body),
            Err(e) => {
                let err = LmsError::validation(format!("Invalid request body: {e}"));
                return print_envelope(&ApiResponse::<()>::failure(&err));
            }
        }
    }

    let envelope = client.request(&args.endpoint, options).await;
    print_envelope(&envelope)
}

async fn session(
    client: &ApiClient,
    mut session: SessionStore,
    action: SessionAction,
) -> std::io::Result<ExitCode> {
    match action {
        SessionAction::Show => {
            println!("{}", serde_json::to_string_pretty(session.state())?);
            return Ok(ExitCode::SUCCESS);
        }
        SessionAction::SignIn { user_id } => session.sign_in(user_id),
        SessionAction::SignOut => session.sign_out(),
        SessionAction::Complete { activity_id } => {
            session.mark_completed(activity_id);
        }
        SessionAction::Uncomplete { activity_id } => {
            session.mark_incomplete(&activity_id);
        }
        SessionAction::Progress { course_id } => {
            let response = client.get_course_sections(&course_id).await;
            if !response.success {
                return print_envelope(&response);
            }
            let sections = response.data.unwrap_or_default();
            println!("{}: {}%", course_id, session.course_progress(&sections));
            return Ok(ExitCode::SUCCESS);
        }
    }

    if let Err(e) = session.save() {
        eprintln!("{}", e.format_simple());
        return Ok(ExitCode::FAILURE);
    }
    println!("{}", serde_json::to_string_pretty(session.state())?);
    Ok(ExitCode::SUCCESS)
}
