use serde::{Deserialize, Serialize};

use crate::domain::common::{lenient, Draft, ForeignKey, RecordId, Resource};
use crate::shared::form::{Choice, FieldKind, FormField};
use crate::shared::table::{or_dash, Column};

/// Tarjeta de fidelidad de un cliente
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoyaltyCard {
    pub id: RecordId,
    #[serde(default)]
    pub client: ForeignKey,
    #[serde(default, deserialize_with = "lenient::string")]
    pub card_number: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub tier: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub points: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub discount_percentage: String,
    #[serde(default, deserialize_with = "lenient::date")]
    pub issue_date: String,
    #[serde(default = "active", deserialize_with = "lenient::flag")]
    pub is_active: bool,
}

fn active() -> bool {
    true
}

pub const TIER_BRONZE: &str = "bronze";

pub const TIER_CHOICES: &[Choice] = &[
    Choice::new(TIER_BRONZE, "Bronce"),
    Choice::new("silver", "Plata"),
    Choice::new("gold", "Oro"),
    Choice::new("platinum", "Platino"),
];

impl Resource for LoyaltyCard {
    type Draft = LoyaltyCardDraft;

    fn id(&self) -> RecordId {
        self.id
    }

    fn endpoint() -> &'static str {
        "commercial/loyalty-cards/"
    }

    fn element_name() -> &'static str {
        "Tarjeta de Fidelidad"
    }

    fn list_name() -> &'static str {
        "Tarjetas de Fidelidad"
    }

    fn columns() -> &'static [Column<Self>] {
        COLUMNS
    }

    fn form_fields() -> &'static [FormField<LoyaltyCardDraft>] {
        FIELDS
    }

    fn references() -> &'static [&'static str] {
        REFERENCES
    }
}

const CLIENTS_ENDPOINT: &str = "/clients/";

const REFERENCES: &[&str] = &[CLIENTS_ENDPOINT];

const COLUMNS: &[Column<LoyaltyCard>] = &[
    Column::new("Número", |c: &LoyaltyCard| c.card_number.clone()),
    Column::new("Cliente", |c: &LoyaltyCard| c.client.display()),
    Column::new("Nivel", |c: &LoyaltyCard| {
        TIER_CHOICES
            .iter()
            .find(|t| t.value == c.tier)
            .map(|t| t.label.to_string())
            .unwrap_or_else(|| or_dash(&c.tier))
    }),
    Column::new("Puntos", |c: &LoyaltyCard| or_dash(&c.points)),
    Column::new("Descuento %", |c: &LoyaltyCard| {
        or_dash(&c.discount_percentage)
    }),
    Column::new("Emisión", |c: &LoyaltyCard| or_dash(&c.issue_date)),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoyaltyCardDraft {
    #[serde(skip)]
    pub id: Option<RecordId>,
    pub client: ForeignKey,
    pub card_number: String,
    pub tier: String,
    pub points: String,
    pub discount_percentage: String,
    pub is_active: bool,
}

impl Default for LoyaltyCardDraft {
    fn default() -> Self {
        Self {
            id: None,
            client: ForeignKey::none(),
            card_number: String::new(),
            tier: TIER_BRONZE.to_string(),
            points: "0".to_string(),
            discount_percentage: "0".to_string(),
            is_active: true,
        }
    }
}

impl Draft for LoyaltyCardDraft {
    type Record = LoyaltyCard;

    fn from_record(record: &LoyaltyCard) -> Self {
        Self {
            id: Some(record.id),
            client: record.client.flatten(),
            card_number: record.card_number.clone(),
            tier: record.tier.clone(),
            points: record.points.clone(),
            discount_percentage: record.discount_percentage.clone(),
            is_active: record.is_active,
        }
    }

    fn id(&self) -> Option<RecordId> {
        self.id.filter(RecordId::is_set)
    }
}

const FIELDS: &[FormField<LoyaltyCardDraft>] = &[
    FormField::new(
        "client",
        "Cliente",
        FieldKind::Reference(CLIENTS_ENDPOINT),
        |d: &LoyaltyCardDraft| d.client.input_value(),
        |d: &mut LoyaltyCardDraft, v| d.client = ForeignKey::from_input(&v),
    ),
    FormField::text(
        "card_number",
        "Número de Tarjeta",
        |d: &LoyaltyCardDraft| d.card_number.clone(),
        |d: &mut LoyaltyCardDraft, v| d.card_number = v,
    ),
    FormField::new(
        "tier",
        "Nivel",
        FieldKind::Choice(TIER_CHOICES),
        |d: &LoyaltyCardDraft| d.tier.clone(),
        |d: &mut LoyaltyCardDraft, v| d.tier = v,
    ),
    FormField::new(
        "points",
        "Puntos",
        FieldKind::Number,
        |d: &LoyaltyCardDraft| d.points.clone(),
        |d: &mut LoyaltyCardDraft, v| d.points = v,
    ),
    FormField::new(
        "discount_percentage",
        "Descuento (%)",
        FieldKind::Number,
        |d: &LoyaltyCardDraft| d.discount_percentage.clone(),
        |d: &mut LoyaltyCardDraft, v| d.discount_percentage = v,
    ),
    FormField::new(
        "is_active",
        "Activa",
        FieldKind::Checkbox,
        |d: &LoyaltyCardDraft| d.is_active.to_string(),
        |d: &mut LoyaltyCardDraft, v| d.is_active = v == "true",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list::decode_list;
    use crate::shared::table::render_rows;
    use serde_json::json;

    #[test]
    fn test_tier_label_and_issue_date_not_sent() {
        let rows: Vec<LoyaltyCard> = decode_list(Some(json!({"results": [{
            "id": 1,
            "client": {"id": 6, "name": "Laura Gómez"},
            "card_number": "LC-0001",
            "tier": "gold",
            "points": 120,
            "discount_percentage": "7.50",
            "issue_date": "2026-01-10"
        }]})))
        .unwrap();

        assert_eq!(
            render_rows(&rows, COLUMNS)[0],
            vec!["LC-0001", "Laura Gómez", "Oro", "120", "7.50", "2026-01-10"]
        );
        let payload = serde_json::to_value(LoyaltyCardDraft::from_record(&rows[0])).unwrap();
        assert_eq!(payload["client"], json!(6));
        assert_eq!(payload["points"], json!("120"));
        assert!(payload.get("issue_date").is_none());
    }
}
