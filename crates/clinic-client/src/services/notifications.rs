use std::sync::Arc;

use clinic_core::{CreateNotification, Notification, ReadFlag, RecipientType, UpdateNotification};
use serde::de::IgnoredAny;
use serde_json::json;

use super::CrudService;
use crate::client::ApiClient;
use crate::error::Result;

/// 通知服务
#[derive(Debug, Clone)]
pub struct NotificationService {
    client: Arc<ApiClient>,
}

impl NotificationService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// 当前用户的通知
    pub async fn mine(&self) -> Result<Vec<Notification>> {
        self.client.get(&format!("{}/my", Self::BASE_PATH)).await
    }

    /// 当前用户的未读通知
    pub async fn mine_unread(&self) -> Result<Vec<Notification>> {
        self.client
            .get(&format!("{}/my/unread", Self::BASE_PATH))
            .await
    }

    /// 指定接收者的通知
    pub async fn by_recipient(
        &self,
        recipient_type: RecipientType,
        recipient_id: &str,
    ) -> Result<Vec<Notification>> {
        self.client
            .get(&format!(
                "{}/recipient/{}/{}",
                Self::BASE_PATH,
                recipient_type,
                recipient_id
            ))
            .await
    }

    /// 标记为已读
    pub async fn mark_read(&self, id: &str) -> Result<Notification> {
        self.client
            .patch(
                &format!("{}/read", Self::item_path(id)),
                &ReadFlag { read: true },
            )
            .await
    }

    /// 标记为未读
    pub async fn mark_unread(&self, id: &str) -> Result<Notification> {
        self.client
            .patch(
                &format!("{}/unread", Self::item_path(id)),
                &ReadFlag { read: false },
            )
            .await
    }

    /// 将当前用户的全部通知标记为已读
    pub async fn mark_all_read(&self) -> Result<()> {
        let _: IgnoredAny = self
            .client
            .patch(&format!("{}/all/read", Self::BASE_PATH), &json!({}))
            .await?;
        Ok(())
    }

    /// 删除当前用户的全部通知
    pub async fn delete_all(&self) -> Result<()> {
        let _: IgnoredAny = self
            .client
            .delete(&format!("{}/all", Self::BASE_PATH))
            .await?;
        Ok(())
    }
}

impl CrudService for NotificationService {
    type Entity = Notification;
    type Create = CreateNotification;
    type Update = UpdateNotification;

    const BASE_PATH: &'static str = "/notifications";
    const PLURAL: &'static str = "las notificaciones";
    const SINGULAR: &'static str = "la notificación";

    fn client(&self) -> &ApiClient {
        &self.client
    }
}
