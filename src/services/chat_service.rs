// src/services/chat_service.rs

use crate::{
    common::error::AppError,
    db::{ChatRepository, LinkRepository, OrderRepository},
    models::chat::{CreateMessagePayload, MessageResponse},
    policy::Identity,
};

// Só o portão de acesso: vínculo aceito e participação no par.
// Entrega em tempo real fica a cargo dos clientes (polling).
#[derive(Clone)]
pub struct ChatService {
    chat_repo: ChatRepository,
    link_repo: LinkRepository,
    order_repo: OrderRepository,
}

impl ChatService {
    pub fn new(chat_repo: ChatRepository, link_repo: LinkRepository, order_repo: OrderRepository) -> Self {
        Self {
            chat_repo,
            link_repo,
            order_repo,
        }
    }

    async fn ensure_can_chat(&self, identity: &Identity, supplier_id: i64, consumer_id: i64) -> Result<(), AppError> {
        let is_party = identity.consumer_id == Some(consumer_id)
            || identity.is_supplier_staff(Some(supplier_id));
        if !is_party {
            return Err(AppError::forbidden("You are not part of this conversation"));
        }

        // Reconsultado a cada chamada: o vínculo pode ter mudado
        if !self.link_repo.is_accepted(supplier_id, consumer_id).await? {
            return Err(AppError::forbidden(
                "Chat requires an accepted link between supplier and consumer",
            ));
        }
        Ok(())
    }

    pub async fn send_message(
        &self,
        identity: &Identity,
        payload: &CreateMessagePayload,
    ) -> Result<MessageResponse, AppError> {
        let text = payload.text.trim();
        if text.is_empty() {
            return Err(AppError::InvalidInput("The message cannot be empty.".into()));
        }

        self.ensure_can_chat(identity, payload.supplier_id, payload.consumer_id)
            .await?;

        if let Some(order_id) = payload.order_id {
            let belongs_to_pair = self
                .order_repo
                .find_by_id(order_id)
                .await?
                .is_some_and(|o| o.supplier_id == payload.supplier_id && o.consumer_id == payload.consumer_id);
            if !belongs_to_pair {
                return Err(AppError::InvalidInput(
                    "The referenced order does not belong to this conversation.".into(),
                ));
            }
        }

        let message = self
            .chat_repo
            .create_message(
                payload.supplier_id,
                payload.consumer_id,
                payload.order_id,
                identity.user_id,
                text,
            )
            .await?;

        tracing::debug!(message_id = message.id, sender_id = identity.user_id, "Message sent");
        Ok(message.into())
    }

    pub async fn get_thread(
        &self,
        identity: &Identity,
        supplier_id: i64,
        consumer_id: i64,
    ) -> Result<Vec<MessageResponse>, AppError> {
        self.ensure_can_chat(identity, supplier_id, consumer_id).await?;
        let messages = self.chat_repo.list_thread(supplier_id, consumer_id).await?;
        Ok(messages.into_iter().map(MessageResponse::from).collect())
    }
}
