use client::reference::ReferenceData;
use client::{ApiClient, ApiError};
use contracts::domain::a005_local::aggregate::Local;
use contracts::domain::a006_cash_register::aggregate::CashRegister;
use contracts::domain::common::Resource;
use contracts::shared::list::normalize_list;
use contracts::shared::payload::SubmitBody;
use contracts::shared::pos::cart::SalePayload;

pub const TEMPLATES_ENDPOINT: &str = "/plantillas/";
pub const CLIENTS_ENDPOINT: &str = "/clients/";
pub const PAYMENT_METHODS_ENDPOINT: &str = "/payment-method-types/";
pub const SALES_ENDPOINT: &str = "/sales/";

/// Everything the register screen selects from.
#[derive(Debug, Clone, Default)]
pub struct Terminal {
    pub options: ReferenceData,
    pub registers: Vec<CashRegister>,
    pub locals: Vec<Local>,
}

pub async fn load_terminal(api: &ApiClient) -> Result<Terminal, ApiError> {
    let (templates, clients, payment_methods, registers, locals) = futures::try_join!(
        api.list(TEMPLATES_ENDPOINT),
        api.list(CLIENTS_ENDPOINT),
        api.list(PAYMENT_METHODS_ENDPOINT),
        api.list_records::<CashRegister>(CashRegister::endpoint()),
        api.list_records::<Local>(Local::endpoint()),
    )?;

    let mut options = ReferenceData::empty();
    options.insert(TEMPLATES_ENDPOINT, normalize_list(templates));
    options.insert(CLIENTS_ENDPOINT, normalize_list(clients));
    options.insert(PAYMENT_METHODS_ENDPOINT, normalize_list(payment_methods));

    Ok(Terminal {
        options,
        registers,
        locals,
    })
}

pub async fn create_sale(api: &ApiClient, sale: &SalePayload) -> Result<(), ApiError> {
    let body = SubmitBody::json(sale).map_err(|e| ApiError::Encode(e.to_string()))?;
    api.create(SALES_ENDPOINT, body).await?;
    Ok(())
}
