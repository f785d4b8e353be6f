//! Aggregates - Per-person and dashboard totals over open debts.
//!
//! Totals are folded from the current debt rows on every call. Only open debts count, and
//! each contributes its face value (`amount_original`). Net is always `uom - iou`, so a
//! positive net means the user is owed more than they owe.

use crate::{
    db,
    entities::{DebtType, debt, person},
    errors::Result,
    money::Money,
};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::collections::HashMap;

/// Which way the net balance points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NetPosition {
    /// Contacts owe the user more than the user owes them
    OwedToUser,
    /// The user owes more than they are owed
    UserOwes,
    /// Both directions cancel out
    Even,
}

impl NetPosition {
    fn of(net: Money) -> Self {
        if net.is_positive() {
            Self::OwedToUser
        } else if net.is_negative() {
            Self::UserOwes
        } else {
            Self::Even
        }
    }
}

/// Open-debt totals for one person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonTotals {
    /// Person id
    pub id: String,
    /// Person name
    pub name: String,
    /// Sum of open IOU debts
    pub iou_total: Money,
    /// Sum of open UOM debts
    pub uom_total: Money,
    /// `uom_total - iou_total`
    pub net: Money,
}

impl PersonTotals {
    /// Sign of [`Self::net`] as a position.
    #[must_use]
    pub fn net_position(&self) -> NetPosition {
        NetPosition::of(self.net)
    }
}

/// Open-debt totals across every person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DashboardTotals {
    /// Sum of all open IOU debts
    #[serde(rename = "totalIOU")]
    pub total_iou: Money,
    /// Sum of all open UOM debts
    #[serde(rename = "totalUOM")]
    pub total_uom: Money,
    /// `total_uom - total_iou`
    pub net: Money,
}

impl DashboardTotals {
    /// Sign of [`Self::net`] as a position.
    #[must_use]
    pub fn net_position(&self) -> NetPosition {
        NetPosition::of(self.net)
    }
}

#[derive(Default, Clone, Copy)]
struct Sums {
    iou: Money,
    uom: Money,
}

impl Sums {
    fn add(&mut self, debt: &debt::Model) -> Result<()> {
        let amount = debt.amount()?;
        match debt.debt_type {
            DebtType::Iou => self.iou = self.iou.checked_add(amount)?,
            DebtType::Uom => self.uom = self.uom.checked_add(amount)?,
        }
        Ok(())
    }

    fn net(self) -> Result<Money> {
        self.uom.checked_sub(self.iou)
    }
}

/// Folds debts into dashboard totals. Settled debts are skipped.
pub fn fold_dashboard_totals<'a, I>(debts: I) -> Result<DashboardTotals>
where
    I: IntoIterator<Item = &'a debt::Model>,
{
    let mut sums = Sums::default();
    for debt in debts.into_iter().filter(|d| !d.is_settled()) {
        sums.add(debt)?;
    }
    Ok(DashboardTotals {
        total_iou: sums.iou,
        total_uom: sums.uom,
        net: sums.net()?,
    })
}

/// Folds debts into one row per person, in the order `people` is given.
///
/// People without open debts get zero totals. Settled debts are skipped.
pub fn fold_person_totals(
    people: &[person::Model],
    debts: &[debt::Model],
) -> Result<Vec<PersonTotals>> {
    let mut by_person: HashMap<&str, Sums> = HashMap::new();
    for debt in debts.iter().filter(|d| !d.is_settled()) {
        by_person
            .entry(debt.person_id.as_str())
            .or_default()
            .add(debt)?;
    }

    people
        .iter()
        .map(|p| -> Result<PersonTotals> {
            let sums = by_person.get(p.id.as_str()).copied().unwrap_or_default();
            Ok(PersonTotals {
                id: p.id.clone(),
                name: p.name.clone(),
                iou_total: sums.iou,
                uom_total: sums.uom,
                net: sums.net()?,
            })
        })
        .collect()
}

/// Totals for every person, ordered by case-insensitive name.
pub async fn get_person_totals(db: &DatabaseConnection) -> Result<Vec<PersonTotals>> {
    let people = db::list_all_people(db).await?;
    let debts = db::list_open_debts(db).await?;
    fold_person_totals(&people, &debts)
}

/// Totals over all open debts.
pub async fn get_dashboard_totals(db: &DatabaseConnection) -> Result<DashboardTotals> {
    let debts = db::list_open_debts(db).await?;
    fold_dashboard_totals(&debts)
}
