use crate::{
    AccessCodeOptions, CommandCenterClient, CommandCenterError, CommandCenterFactory, Operation,
    ensure_units,
};
use async_trait::async_trait;
use domain::{SiteId, UnitId};
use rumqttc::{AsyncClient, MqttOptions, QoS};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// MQTT 指挥中心配置。
#[derive(Debug, Clone)]
pub struct MqttCommandCenterConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// 指令 topic：`{prefix}/{site_id}/{operation}`
    pub command_topic_prefix: String,
    pub qos: u8,
    pub dispatch_max_retries: u64,
    pub dispatch_backoff_ms: u64,
}

/// 共享的 MQTT 发布端。
struct MqttPublisher {
    client: AsyncClient,
    command_topic_prefix: String,
    qos: QoS,
    max_retries: u64,
    backoff_ms: u64,
}

/// MQTT 指挥中心工厂：所有站点客户端共享同一连接。
#[derive(Clone)]
pub struct MqttCommandCenterFactory {
    publisher: Arc<MqttPublisher>,
}

impl MqttCommandCenterFactory {
    pub fn connect(
        config: MqttCommandCenterConfig,
    ) -> Result<(Self, tokio::task::JoinHandle<()>), CommandCenterError> {
        let client_id = format!("gate-command-center-{}", uuid::Uuid::new_v4());
        let mut options = MqttOptions::new(client_id, config.host, config.port);
        options.set_keep_alive(Duration::from_secs(30));
        if let (Some(username), Some(password)) = (config.username, config.password) {
            options.set_credentials(username, password);
        }
        let (client, mut eventloop) = AsyncClient::new(options, 10);
        let handle = tokio::spawn(async move {
            loop {
                if let Err(err) = eventloop.poll().await {
                    warn!(target: "gate.command_center", "mqtt eventloop error: {}", err);
                    tokio::time::sleep(Duration::from_secs(1)).await;
                }
            }
        });
        Ok((
            Self {
                publisher: Arc::new(MqttPublisher {
                    client,
                    command_topic_prefix: config.command_topic_prefix,
                    qos: qos_from_u8(config.qos),
                    max_retries: config.dispatch_max_retries,
                    backoff_ms: config.dispatch_backoff_ms,
                }),
            },
            handle,
        ))
    }
}

impl CommandCenterFactory for MqttCommandCenterFactory {
    fn new_client(
        &self,
        site_id: SiteId,
        cancel: &CancellationToken,
    ) -> Arc<dyn CommandCenterClient> {
        Arc::new(MqttCommandCenterClient {
            publisher: self.publisher.clone(),
            site_id,
            cancel: cancel.clone(),
        })
    }
}

struct MqttCommandCenterClient {
    publisher: Arc<MqttPublisher>,
    site_id: SiteId,
    cancel: CancellationToken,
}

impl MqttCommandCenterClient {
    async fn publish(
        &self,
        operation: Operation,
        unit_ids: &[UnitId],
        options: &AccessCodeOptions,
    ) -> Result<(), CommandCenterError> {
        ensure_units(operation, unit_ids)?;
        let command_id = uuid::Uuid::new_v4().to_string();
        let payload = command_payload(
            &command_id,
            self.site_id,
            operation,
            unit_ids,
            options,
            now_epoch_ms(),
        )?;
        let topic = topic_for(&self.publisher.command_topic_prefix, self.site_id, operation);
        info!(
            target: "gate.command_center",
            site_id = self.site_id,
            command_id = %command_id,
            operation = operation.as_str(),
            unit_count = unit_ids.len(),
            topic = %topic,
            payload_size = payload.len(),
            "command_center_publish"
        );

        let mut attempt = 0u64;
        loop {
            let published = tokio::select! {
                _ = self.cancel.cancelled() => return Err(CommandCenterError::Cancelled),
                result = self.publisher.client.publish(
                    topic.clone(),
                    self.publisher.qos,
                    false,
                    payload.clone(),
                ) => result,
            };
            let err = match published {
                Ok(()) => return Ok(()),
                Err(err) => CommandCenterError::Dispatch(err.to_string()),
            };
            attempt += 1;
            if attempt > self.publisher.max_retries {
                return Err(err);
            }
            warn!(
                target: "gate.command_center",
                site_id = self.site_id,
                command_id = %command_id,
                attempt = attempt,
                error = %err,
                "command_center_publish_retry"
            );
            if self.publisher.backoff_ms > 0 {
                tokio::select! {
                    _ = self.cancel.cancelled() => return Err(CommandCenterError::Cancelled),
                    _ = tokio::time::sleep(Duration::from_millis(self.publisher.backoff_ms)) => {}
                }
            }
        }
    }
}

#[async_trait]
impl CommandCenterClient for MqttCommandCenterClient {
    async fn revoke_access_codes(
        &self,
        unit_ids: &[UnitId],
        options: &AccessCodeOptions,
    ) -> Result<(), CommandCenterError> {
        self.publish(Operation::Revoke, unit_ids, options).await
    }

    async fn set_access_codes(
        &self,
        unit_ids: &[UnitId],
        options: &AccessCodeOptions,
    ) -> Result<(), CommandCenterError> {
        self.publish(Operation::Set, unit_ids, options).await
    }
}

fn qos_from_u8(value: u8) -> QoS {
    match value {
        0 => QoS::AtMostOnce,
        1 => QoS::AtLeastOnce,
        2 => QoS::ExactlyOnce,
        _ => QoS::AtLeastOnce,
    }
}

fn topic_for(prefix: &str, site_id: SiteId, operation: Operation) -> String {
    let prefix = prefix.trim_end_matches('/');
    format!("{}/{}/{}", prefix, site_id, operation.as_str())
}

fn now_epoch_ms() -> i64 {
    let now = std::time::SystemTime::now();
    let duration = now
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    duration.as_millis() as i64
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct CommandMqttEnvelope<'a> {
    command_id: &'a str,
    site_id: SiteId,
    operation: &'static str,
    unit_ids: &'a [UnitId],
    options: Vec<&'a str>,
    issued_at_ms: i64,
}

fn command_payload(
    command_id: &str,
    site_id: SiteId,
    operation: Operation,
    unit_ids: &[UnitId],
    options: &AccessCodeOptions,
    issued_at_ms: i64,
) -> Result<Vec<u8>, CommandCenterError> {
    let envelope = CommandMqttEnvelope {
        command_id,
        site_id,
        operation: operation.as_str(),
        unit_ids,
        options: options.flags.iter().map(String::as_str).collect(),
        issued_at_ms,
    };
    serde_json::to_vec(&envelope).map_err(|err| CommandCenterError::Payload(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_includes_site_and_operation() {
        assert_eq!(
            topic_for("gate/commands/", 7, Operation::Revoke),
            "gate/commands/7/revoke"
        );
        assert_eq!(topic_for("gate/commands", 7, Operation::Set), "gate/commands/7/set");
    }

    #[test]
    fn payload_uses_camel_case_envelope() {
        let options = AccessCodeOptions::default().with_flag("force");
        let payload =
            command_payload("cmd-1", 7, Operation::Set, &[42, 43], &options, 1_700_000_000_000)
                .expect("payload");
        let value: serde_json::Value = serde_json::from_slice(&payload).expect("json");
        assert_eq!(value["commandId"], "cmd-1");
        assert_eq!(value["siteId"], 7);
        assert_eq!(value["operation"], "set");
        assert_eq!(value["unitIds"], serde_json::json!([42, 43]));
        assert_eq!(value["options"], serde_json::json!(["force"]));
        assert_eq!(value["issuedAtMs"], 1_700_000_000_000i64);
    }

    #[test]
    fn unknown_qos_falls_back_to_at_least_once() {
        assert_eq!(qos_from_u8(0), QoS::AtMostOnce);
        assert_eq!(qos_from_u8(2), QoS::ExactlyOnce);
        assert_eq!(qos_from_u8(9), QoS::AtLeastOnce);
    }
}
