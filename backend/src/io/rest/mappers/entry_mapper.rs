use chrono::NaiveDate;
use shared::{DailyEntryResponse, DenominationLine, SaveDailyEntryRequest};

use crate::domain::commands::entries::SaveDailyEntryCommand;
use crate::domain::formatting::format_amount;
use crate::domain::DailyForm;

pub struct EntryMapper;

impl EntryMapper {
    pub fn to_command(date: NaiveDate, request: SaveDailyEntryRequest) -> SaveDailyEntryCommand {
        SaveDailyEntryCommand {
            date,
            counts: request.counts.into_iter().collect(),
            parking: request.parking,
            saving: request.saving,
            debt_credit: request.debt_credit,
        }
    }

    pub fn to_dto(form: &DailyForm) -> DailyEntryResponse {
        let entry = &form.entry;
        let lines = entry
            .counts
            .iter()
            .map(|(denomination, count)| DenominationLine {
                denomination: denomination.value(),
                label: denomination.label(),
                count,
                subtotal: denomination.amount_for(count),
            })
            .collect();

        DailyEntryResponse {
            date: entry.date,
            cashier: entry.cashier.clone(),
            lines,
            parking: entry.adjustments.parking,
            saving: entry.adjustments.saving,
            debt_credit: entry.adjustments.debt_credit,
            total_cash: form.total_cash(),
            formatted_total_cash: format_amount(form.total_cash()),
            submitted: form.submitted,
        }
    }
}
