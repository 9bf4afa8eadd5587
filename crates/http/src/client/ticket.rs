//! Support tickets

use super::{ApiRequest, ClientError, PawClient};
use crate::types::{PageQuery, Paginated, Ticket, TicketListParams, TicketPayload};

const TICKETS: &str = "/pet/ticket/";

/// Ticket endpoints under `/pet/ticket/`
pub struct TicketsApi<'a> {
    client: &'a PawClient,
}

impl PawClient {
    /// Support tickets
    pub fn tickets(&self) -> TicketsApi<'_> {
        TicketsApi { client: self }
    }
}

impl TicketsApi<'_> {
    pub async fn list(&self, params: &TicketListParams) -> Result<Paginated<Ticket>, ClientError> {
        let req = ApiRequest::get(TICKETS).query(params)?;
        self.client.execute(req).await
    }

    pub async fn retrieve(&self, id: u64) -> Result<Ticket, ClientError> {
        self.client
            .execute(ApiRequest::get(format!("{TICKETS}{id}/")))
            .await
    }

    pub async fn create(&self, ticket: &TicketPayload) -> Result<Ticket, ClientError> {
        let req = ApiRequest::post(TICKETS).json(ticket)?;
        self.client.execute(req).await
    }

    pub async fn update(&self, id: u64, ticket: &TicketPayload) -> Result<Ticket, ClientError> {
        let req = ApiRequest::patch(format!("{TICKETS}{id}/")).json(ticket)?;
        self.client.execute(req).await
    }

    pub async fn remove(&self, id: u64) -> Result<(), ClientError> {
        self.client
            .execute_empty(ApiRequest::delete(format!("{TICKETS}{id}/")))
            .await
    }

    /// Tickets opened by the current user
    pub async fn mine(&self, page: &PageQuery) -> Result<Paginated<Ticket>, ClientError> {
        let req = ApiRequest::get(format!("{TICKETS}my_tickets/")).query(page)?;
        self.client.execute(req).await
    }
}
