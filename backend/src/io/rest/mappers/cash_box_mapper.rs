//! backend/src/io/rest/mappers/cash_box_mapper.rs

use serde_json::Value;
use shared::{CashBoxDetailDto, CashBoxDto, CashBoxLineDto, RawBreakdown};
use tracing::warn;

use crate::domain::errors::ServiceError;
use crate::domain::models::{
    parse_entry_date, parse_vale_amount, Breakdown, CashBox, CashBoxValidationError, Shift,
    StoredCashBox,
};
use crate::domain::reconciliation::{format_amount, CashBoxLine};

/// Mapper between cash box DTOs and domain cash boxes.
pub struct CashBoxMapper;

impl CashBoxMapper {
    /// Converts a form entry to a domain box. Unknown denomination keys are
    /// dropped with a warning; bad dates, shifts and amounts are errors.
    pub fn to_domain(dto: &CashBoxDto) -> Result<CashBox, CashBoxValidationError> {
        let conversion = Breakdown::from_raw(&dto.breakdown);
        if !conversion.rejected_keys.is_empty() {
            warn!(
                "Ignoring unknown denominations {:?} for worker '{}'",
                conversion.rejected_keys, dto.worker_name
            );
        }

        Ok(CashBox {
            date: parse_entry_date(&dto.date)?,
            worker_name: dto.worker_name.clone(),
            shift: Shift::try_from(dto.shift)?,
            vale_amount: parse_vale_amount(&dto.vale_amount)?,
            breakdown: conversion.breakdown,
        })
    }

    /// Converts a list of form entries, reporting the position of the first bad one.
    pub fn to_domain_list(dtos: &[CashBoxDto]) -> Result<Vec<CashBox>, ServiceError> {
        dtos.iter()
            .enumerate()
            .map(|(index, dto)| {
                Self::to_domain(dto).map_err(|source| ServiceError::InvalidCashBox { index, source })
            })
            .collect()
    }

    /// Converts a domain box back to its form representation.
    pub fn to_dto(cash_box: &CashBox) -> CashBoxDto {
        let breakdown: RawBreakdown = cash_box
            .breakdown
            .to_map()
            .into_iter()
            .map(|(key, count)| (key, Value::from(count)))
            .collect();

        CashBoxDto {
            date: cash_box
                .date
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            worker_name: cash_box.worker_name.clone(),
            shift: cash_box.shift.number(),
            vale_amount: cash_box.vale_amount.to_string(),
            breakdown,
        }
    }

    pub fn to_line_dto(line: &CashBoxLine) -> CashBoxLineDto {
        CashBoxLineDto {
            index: line.index,
            date: line
                .cash_box
                .date
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            worker_name: line.cash_box.worker_name.clone(),
            shift: line.cash_box.shift.number(),
            vale_amount: format_amount(line.cash_box.vale_amount),
            breakdown_total: format_amount(line.breakdown_total),
            difference: format_amount(line.difference),
            balanced: line.is_balanced(),
        }
    }

    pub fn to_detail_dto(stored: &StoredCashBox) -> CashBoxDetailDto {
        let cash_box = &stored.cash_box;
        CashBoxDetailDto {
            id: stored.id,
            position: stored.position,
            date: cash_box
                .date
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            worker_name: cash_box.worker_name.clone(),
            shift: cash_box.shift.number(),
            vale_amount: format_amount(cash_box.vale_amount),
            breakdown: cash_box.breakdown.to_map(),
            breakdown_total: format_amount(cash_box.breakdown_total()),
            difference: format_amount(cash_box.difference()),
            balanced: cash_box.is_balanced(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn dto(value: serde_json::Value) -> CashBoxDto {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_to_domain() {
        let cash_box = CashBoxMapper::to_domain(&dto(json!({
            "date": "2024-01-01",
            "worker_name": "Ana",
            "shift": 2,
            "vale_amount": "99,50",
            "breakdown": {"50": "1", "20": 2, "0.5": 3, "7": 1}
        })))
        .unwrap();

        assert_eq!(cash_box.date, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(cash_box.shift, Shift::Afternoon);
        assert_eq!(cash_box.vale_amount, dec!(99.50));
        assert_eq!(cash_box.breakdown_total(), dec!(91.50));
    }

    #[test]
    fn test_blank_entry_maps_to_blank_box() {
        let cash_box = CashBoxMapper::to_domain(&dto(json!({}))).unwrap();
        assert_eq!(cash_box, CashBox::blank());
    }

    #[test]
    fn test_invalid_entries_report_their_index() {
        let entries = vec![
            dto(json!({"date": "2024-01-01", "worker_name": "Ana"})),
            dto(json!({"shift": 3})),
        ];
        match CashBoxMapper::to_domain_list(&entries) {
            Err(ServiceError::InvalidCashBox { index, source }) => {
                assert_eq!(index, 1);
                assert_eq!(source, CashBoxValidationError::InvalidShift(3));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_to_dto_keeps_entered_values() {
        let cash_box = CashBox {
            date: NaiveDate::from_ymd_opt(2024, 3, 9),
            worker_name: "Luis".to_string(),
            shift: Shift::Morning,
            vale_amount: dec!(12.30),
            breakdown: Breakdown::from_counts(&[("10", 1), ("0.10", 23)]),
        };
        let dto = CashBoxMapper::to_dto(&cash_box);
        assert_eq!(dto.date, "2024-03-09");
        assert_eq!(dto.vale_amount, "12.30");
        assert_eq!(dto.breakdown.get("0.10"), Some(&json!(23)));
        assert_eq!(CashBoxMapper::to_domain(&dto).unwrap(), cash_box);
    }
}
