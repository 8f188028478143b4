use serde::Serialize;
use std::fmt;

use crate::domain::common::{ForeignKey, RecordId};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    /// Product template id (`design` on the backend)
    #[serde(rename = "design")]
    pub product: RecordId,
    #[serde(skip)]
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub cost: f64,
}

impl CartLine {
    pub fn subtotal(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CartError {
    InvalidLine,
    MissingClient,
    MissingPaymentMethod,
    Empty,
}

impl fmt::Display for CartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::InvalidLine => "La cantidad y el precio deben ser mayores que cero.",
            Self::MissingClient => "Por favor, seleccione un cliente.",
            Self::MissingPaymentMethod => "Por favor, seleccione un método de pago.",
            Self::Empty => "Por favor, añada al menos un producto a la venta.",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for CartError {}

/// Body posted to `/sales/` when the cart is checked out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalePayload {
    pub client: ForeignKey,
    pub payment_method: ForeignKey,
    pub local: ForeignKey,
    pub total_amount: f64,
    pub discount_reason: String,
    pub applied_discount: f64,
    pub items: Vec<CartLine>,
}

/// Sale being composed at the register.
///
/// Discount amount and percentage are two views of the same discount and are
/// kept in sync against the current total. The discount only affects the net
/// total once applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    pub client: ForeignKey,
    pub payment_method: ForeignKey,
    pub discount_reason: String,
    lines: Vec<CartLine>,
    discount_amount: f64,
    discount_percentage: f64,
    applied_discount: f64,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add a product; a product already in the cart gets its quantity increased.
    pub fn add_line(
        &mut self,
        product: RecordId,
        name: impl Into<String>,
        quantity: u32,
        unit_price: f64,
    ) -> Result<(), CartError> {
        if quantity == 0 || unit_price <= 0.0 || !unit_price.is_finite() {
            return Err(CartError::InvalidLine);
        }
        match self.lines.iter_mut().find(|l| l.product == product) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.lines.push(CartLine {
                product,
                name: name.into(),
                quantity,
                unit_price,
                cost: 0.0,
            }),
        }
        Ok(())
    }

    /// Replace a line's quantity. Zero is rejected; use `remove_line` instead.
    pub fn set_quantity(&mut self, product: RecordId, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidLine);
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.product == product) {
            line.quantity = quantity;
        }
        Ok(())
    }

    pub fn remove_line(&mut self, product: RecordId) {
        self.lines.retain(|l| l.product != product);
    }

    pub fn total(&self) -> f64 {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    pub fn discount_amount(&self) -> f64 {
        self.discount_amount
    }

    pub fn discount_percentage(&self) -> f64 {
        self.discount_percentage
    }

    pub fn applied_discount(&self) -> f64 {
        self.applied_discount
    }

    pub fn set_discount_amount(&mut self, amount: f64) {
        let amount = sanitize(amount);
        let total = self.total();
        self.discount_amount = amount;
        self.discount_percentage = if total > 0.0 {
            amount / total * 100.0
        } else {
            0.0
        };
    }

    pub fn set_discount_percentage(&mut self, percentage: f64) {
        let percentage = sanitize(percentage);
        self.discount_percentage = percentage;
        self.discount_amount = self.total() * percentage / 100.0;
    }

    pub fn apply_discount(&mut self) {
        self.applied_discount = self.discount_amount;
    }

    pub fn net_total(&self) -> f64 {
        self.total() - self.applied_discount
    }

    /// Validate and build the sale body. `local` comes from the selected cash register.
    pub fn checkout(&self, local: ForeignKey) -> Result<SalePayload, CartError> {
        if self.client.is_empty() {
            return Err(CartError::MissingClient);
        }
        if self.payment_method.is_empty() {
            return Err(CartError::MissingPaymentMethod);
        }
        if self.lines.is_empty() {
            return Err(CartError::Empty);
        }
        Ok(SalePayload {
            client: self.client.flatten(),
            payment_method: self.payment_method.flatten(),
            local: local.flatten(),
            total_amount: round2(self.net_total()),
            discount_reason: self.discount_reason.clone(),
            applied_discount: round2(self.applied_discount),
            items: self.lines.clone(),
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

fn sanitize(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}

pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
