use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Overflow;
use crate::money::decimal_from_json;

#[derive(Deserialize, Debug, PartialEq, Clone)]
pub struct LineItem {
    pub price: Decimal,
    pub count: Decimal,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LineItem {
    pub fn row_price(&self) -> Result<Decimal, Overflow> {
        self.price
            .checked_mul(self.count)
            .ok_or(Overflow("row price"))
    }
}

/// Contents of a data file. Fields other than `items` are handed to the
/// template untouched.
#[derive(Deserialize, Debug, PartialEq, Clone)]
pub struct Document {
    #[serde(default)]
    pub items: Option<Vec<LineItem>>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Serialize, Debug, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TaxBreakdown {
    pub total_excluding_taxes: Decimal,
    pub total_taxes: Decimal,
}

#[derive(Serialize, Debug, PartialEq, Clone)]
pub struct Totals {
    pub total: Decimal,
    #[serde(flatten)]
    pub taxes: Option<TaxBreakdown>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PricedItem<'a> {
    price: Decimal,
    count: Decimal,
    #[serde(flatten)]
    extra: &'a Map<String, Value>,
    row_price: Decimal,
}

/// Rendering context of a document: its own fields plus the computed ones.
/// Computed keys are serialized last, so they win over input keys of the
/// same name.
#[derive(Serialize, Debug)]
pub struct PricedDocument<'a> {
    #[serde(flatten)]
    fields: &'a Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    items: Option<Vec<PricedItem<'a>>>,
    #[serde(flatten)]
    totals: Option<Totals>,
}

impl Document {
    /// VAT percentage, when `vat` is a number strictly greater than zero.
    pub fn tax_rate(&self) -> Option<Decimal> {
        self.fields
            .get("vat")
            .and_then(decimal_from_json)
            .filter(|rate| *rate > Decimal::ZERO)
    }

    pub fn calculate(&self) -> Result<Option<Totals>, Overflow> {
        let items = match self.items.as_ref() {
            Some(items) => items,
            None => return Ok(None),
        };

        let mut subtotal = Decimal::ZERO;
        for item in items.iter() {
            subtotal = subtotal
                .checked_add(item.row_price()?)
                .ok_or(Overflow("total"))?;
        }

        let totals = match self.tax_rate() {
            Some(rate) => {
                let taxes = subtotal
                    .checked_mul(rate)
                    .and_then(|t| t.checked_div(Decimal::ONE_HUNDRED))
                    .ok_or(Overflow("taxes"))?;
                Totals {
                    total: subtotal.checked_add(taxes).ok_or(Overflow("total"))?,
                    taxes: Some(TaxBreakdown {
                        total_excluding_taxes: subtotal,
                        total_taxes: taxes,
                    }),
                }
            }
            None => Totals {
                total: subtotal,
                taxes: None,
            },
        };
        Ok(Some(totals))
    }

    pub fn priced(&self) -> Result<PricedDocument<'_>, Overflow> {
        let items = match self.items.as_ref() {
            Some(items) => Some(
                items
                    .iter()
                    .map(|item| {
                        Ok(PricedItem {
                            price: item.price,
                            count: item.count,
                            extra: &item.extra,
                            row_price: item.row_price()?,
                        })
                    })
                    .collect::<Result<Vec<_>, Overflow>>()?,
            ),
            None => None,
        };

        Ok(PricedDocument {
            fields: &self.fields,
            items,
            totals: self.calculate()?,
        })
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_decimal() -> impl Strategy<Value = Decimal> {
        (0i64..10_000_000, 0u32..3).prop_map(|(num, scale)| Decimal::new(num, scale))
    }

    prop_compose! {
        fn arb_item()(price in arb_decimal(), count in arb_decimal()) -> LineItem {
            LineItem { price, count, extra: Map::new() }
        }
    }

    prop_compose! {
        fn arb_items()(items in prop::collection::vec(arb_item(), 0..20))
            -> Vec<LineItem> {
            items
        }
    }

    fn document(items: Vec<LineItem>, vat: Option<Value>) -> Document {
        let mut fields = Map::new();
        if let Some(vat) = vat {
            fields.insert("vat".to_string(), vat);
        }
        Document {
            items: Some(items),
            fields,
        }
    }

    proptest! {
        #[test]
        fn total_is_sum_of_rows(items in arb_items(), vat in -100i64..=0) {
            let expected: Decimal = items.iter().map(|i| i.price * i.count).sum();
            let totals = document(items, Some(Value::from(vat)))
                .calculate()
                .unwrap()
                .unwrap();
            prop_assert_eq!(totals.total, expected);
            prop_assert_eq!(totals.taxes, None);
        }

        #[test]
        fn taxes_add_up(items in arb_items(), vat in 1u32..100) {
            let raw: Decimal = items.iter().map(|i| i.price * i.count).sum();
            let totals = document(items, Some(Value::from(vat)))
                .calculate()
                .unwrap()
                .unwrap();
            let taxes = totals.taxes.unwrap();
            prop_assert_eq!(taxes.total_excluding_taxes, raw);
            prop_assert_eq!(taxes.total_taxes, raw * Decimal::from(vat) / Decimal::ONE_HUNDRED);
            prop_assert_eq!(totals.total, raw + taxes.total_taxes);
        }
    }
}
