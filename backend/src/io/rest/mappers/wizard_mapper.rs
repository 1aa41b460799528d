//! backend/src/io/rest/mappers/wizard_mapper.rs

use shared::{WizardActionDto, WizardStateDto};

use super::cash_box_mapper::CashBoxMapper;
use super::session_mapper::SessionMapper;
use crate::domain::errors::ServiceError;
use crate::domain::wizard::{WizardAction, WizardError, WizardState, WizardStep};

/// Mapper between the wizard wire format and the domain state machine.
pub struct WizardMapper;

impl WizardMapper {
    pub fn to_step(step: u8, box_index: Option<usize>) -> Result<WizardStep, WizardError> {
        match step {
            1 => Ok(WizardStep::Configuring),
            2 => Ok(WizardStep::EnteringBoxes {
                index: box_index.unwrap_or(0),
            }),
            3 => Ok(WizardStep::Validating),
            4 => Ok(WizardStep::Summarizing),
            5 => Ok(WizardStep::Reporting),
            other => Err(WizardError::InvalidStep(other)),
        }
    }

    pub fn to_state(dto: &WizardStateDto) -> Result<WizardState, ServiceError> {
        let step = Self::to_step(dto.step, dto.box_index)?;
        let session_date = match dto.session_date.trim() {
            "" => None,
            raw => Some(SessionMapper::parse_session_date(raw)?),
        };
        let cash_boxes = CashBoxMapper::to_domain_list(&dto.cash_boxes)?;

        Ok(WizardState::restore(
            step,
            session_date,
            dto.auditor_name.clone(),
            cash_boxes,
        )?)
    }

    pub fn to_state_dto(state: &WizardState) -> WizardStateDto {
        let box_index = match state.step {
            WizardStep::EnteringBoxes { index } => Some(index),
            _ => None,
        };
        WizardStateDto {
            step: state.step.number(),
            box_index,
            session_date: state
                .session_date
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            auditor_name: state.auditor_name.clone(),
            cash_boxes: state.cash_boxes.iter().map(CashBoxMapper::to_dto).collect(),
        }
    }

    pub fn to_action(dto: WizardActionDto) -> Result<WizardAction, ServiceError> {
        let action = match dto {
            WizardActionDto::Configure {
                box_count,
                session_date,
                auditor_name,
            } => WizardAction::Configure {
                box_count,
                session_date: match session_date.as_deref().map(str::trim) {
                    None | Some("") => None,
                    Some(raw) => Some(SessionMapper::parse_session_date(raw)?),
                },
                auditor_name,
            },
            WizardActionDto::Next => WizardAction::Next,
            WizardActionDto::Back => WizardAction::Back,
            WizardActionDto::Reset => WizardAction::Reset,
            WizardActionDto::UpdateBox { index, cash_box } => WizardAction::UpdateBox {
                index,
                cash_box: CashBoxMapper::to_domain(&cash_box)
                    .map_err(|source| ServiceError::InvalidCashBox { index, source })?,
            },
            WizardActionDto::SetAuditor { name } => WizardAction::SetAuditor { name },
            WizardActionDto::SetSessionDate { date } => WizardAction::SetSessionDate {
                date: match date.trim() {
                    "" => None,
                    raw => Some(SessionMapper::parse_session_date(raw)?),
                },
            },
        };
        Ok(action)
    }
}
