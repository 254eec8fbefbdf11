//! gate-api 启动入口：加载配置、建立连接、装配依赖并启动 HTTP 服务。

use gate_access::{AccessCodeEditService, AccessCodeRules, EditDependencies};
use gate_api::{AppState, build_app};
use gate_auth::{AuthService, JwtManager};
use gate_command_center::{
    CommandCenterFactory, MqttCommandCenterConfig, MqttCommandCenterFactory,
    NoopCommandCenterFactory,
};
use gate_config::AppConfig;
use gate_storage::{
    AuditLogStore, PgAccessCodeStore, PgAccountStore, PgAuditLogStore, PgUnitStore,
    StoreAuditRecorder, connect_pool,
};
use gate_telemetry::init_tracing;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在），便于直接 cargo run 启动
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    init_tracing();

    // Postgres 存储（需先执行 migrations）
    let pool = connect_pool(&config.database_url).await?;
    let audit_log_store: Arc<dyn AuditLogStore> = Arc::new(PgAuditLogStore::new(pool.clone()));

    let command_center: Arc<dyn CommandCenterFactory> = if config.command_center_enabled {
        let (factory, _eventloop) = MqttCommandCenterFactory::connect(MqttCommandCenterConfig {
            host: config.mqtt_host.clone(),
            port: config.mqtt_port,
            username: config.mqtt_username.clone(),
            password: config.mqtt_password.clone(),
            command_topic_prefix: config.command_topic_prefix.clone(),
            qos: config.command_qos,
            dispatch_max_retries: config.command_dispatch_max_retries,
            dispatch_backoff_ms: config.command_dispatch_backoff_ms,
        })?;
        info!(
            target: "gate.command_center",
            host = %config.mqtt_host,
            port = config.mqtt_port,
            topic_prefix = %config.command_topic_prefix,
            "command_center_mqtt_enabled"
        );
        Arc::new(factory)
    } else {
        warn!(target: "gate.command_center", "command center disabled, using noop client");
        Arc::new(NoopCommandCenterFactory)
    };

    let edit_service = Arc::new(AccessCodeEditService::new(EditDependencies {
        accounts: Arc::new(PgAccountStore::new(pool.clone())),
        units: Arc::new(PgUnitStore::new(pool.clone())),
        access_codes: Arc::new(PgAccessCodeStore::new(pool)),
        command_center,
        audit: Arc::new(StoreAuditRecorder::new(audit_log_store.clone())),
        rules: AccessCodeRules::new(config.access_code_min_length, config.access_code_max_length),
    }));

    let jwt = JwtManager::new(config.jwt_secret.clone(), config.jwt_access_ttl_seconds);
    let state = AppState {
        auth: Arc::new(AuthService::new(jwt)),
        edit_service,
        audit_log_store,
        edit_timeout: Duration::from_millis(config.edit_timeout_ms),
    };

    let listener = tokio::net::TcpListener::bind(&config.http_addr).await?;
    info!(addr = %config.http_addr, "gate_api_listening");
    axum::serve(listener, build_app(state)).await?;
    Ok(())
}
