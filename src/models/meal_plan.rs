use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealSlot {
    pub const ALL: [MealSlot; 3] = [Self::Breakfast, Self::Lunch, Self::Dinner];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "breakfast" => Some(Self::Breakfast),
            "lunch" => Some(Self::Lunch),
            "dinner" => Some(Self::Dinner),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayMeals {
    pub breakfast: Option<String>,
    pub lunch: Option<String>,
    pub dinner: Option<String>,
}

impl DayMeals {
    pub fn get(&self, slot: MealSlot) -> Option<&str> {
        match slot {
            MealSlot::Breakfast => self.breakfast.as_deref(),
            MealSlot::Lunch => self.lunch.as_deref(),
            MealSlot::Dinner => self.dinner.as_deref(),
        }
    }

    pub fn set(&mut self, slot: MealSlot, recipe_id: Option<String>) {
        let target = match slot {
            MealSlot::Breakfast => &mut self.breakfast,
            MealSlot::Lunch => &mut self.lunch,
            MealSlot::Dinner => &mut self.dinner,
        };
        *target = recipe_id;
    }
}

/// One calendar week (Monday start) of meal slots, keyed by YYYY-MM-DD.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlan {
    pub week_of: String,
    pub days: BTreeMap<String, DayMeals>,
}

impl MealPlan {
    /// A plan with all 21 slots empty.
    pub fn empty(week_start: NaiveDate) -> Self {
        let days = week_dates(week_start)
            .into_iter()
            .map(|date| (date_key(date), DayMeals::default()))
            .collect();
        Self {
            week_of: date_key(week_start),
            days,
        }
    }

    /// Distinct assigned recipe ids in day order, then breakfast/lunch/dinner.
    pub fn recipe_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = Vec::new();
        for day in self.days.values() {
            for slot in MealSlot::ALL {
                if let Some(id) = day.get(slot) {
                    if !ids.iter().any(|existing| existing == id) {
                        ids.push(id.to_owned());
                    }
                }
            }
        }
        ids
    }
}

/// Monday of the week containing `date`; Sunday belongs to the previous week.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

pub fn week_dates(week_start: NaiveDate) -> Vec<NaiveDate> {
    week_start.iter_days().take(7).collect()
}

pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, DATE_KEY_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn week_start_is_monday_for_every_day_of_the_week() {
        // 2026-10-19 is a Monday
        let monday = date(2026, 10, 19);
        for offset in 0..7 {
            let day = monday + Days::new(offset);
            assert_eq!(week_start(day), monday, "day {day}");
        }
    }

    #[test]
    fn sunday_belongs_to_previous_week() {
        assert_eq!(week_start(date(2026, 10, 25)), date(2026, 10, 19));
        assert_eq!(week_start(date(2026, 10, 26)), date(2026, 10, 26));
    }

    #[test]
    fn week_start_crosses_year_boundary() {
        // 2027-01-01 is a Friday
        assert_eq!(week_start(date(2027, 1, 1)), date(2026, 12, 28));
    }

    #[test]
    fn empty_plan_has_seven_null_days() {
        let plan = MealPlan::empty(date(2026, 10, 19));
        assert_eq!(plan.week_of, "2026-10-19");
        let keys: Vec<_> = plan.days.keys().cloned().collect();
        assert_eq!(keys.first().map(String::as_str), Some("2026-10-19"));
        assert_eq!(keys.last().map(String::as_str), Some("2026-10-25"));
        assert_eq!(keys.len(), 7);
        assert!(plan.days.values().all(|d| *d == DayMeals::default()));
        assert!(plan.recipe_ids().is_empty());
    }

    #[test]
    fn recipe_ids_are_distinct_in_first_seen_order() {
        let mut plan = MealPlan::empty(date(2026, 10, 19));
        plan.days.get_mut("2026-10-19").unwrap().set(MealSlot::Dinner, Some("r2".into()));
        plan.days.get_mut("2026-10-19").unwrap().set(MealSlot::Breakfast, Some("r1".into()));
        plan.days.get_mut("2026-10-20").unwrap().set(MealSlot::Lunch, Some("r2".into()));
        plan.days.get_mut("2026-10-21").unwrap().set(MealSlot::Lunch, Some("r3".into()));
        assert_eq!(plan.recipe_ids(), vec!["r1", "r2", "r3"]);
    }

    #[test]
    fn plan_serializes_with_camel_case_week_key() {
        let plan = MealPlan::empty(date(2026, 10, 19));
        let v = serde_json::to_value(&plan).unwrap();
        assert_eq!(v["weekOf"], "2026-10-19");
        assert!(v["days"]["2026-10-22"]["dinner"].is_null());
    }

    #[test]
    fn slot_parsing_is_case_insensitive() {
        assert_eq!(MealSlot::from_str("Dinner"), Some(MealSlot::Dinner));
        assert_eq!(MealSlot::from_str("brunch"), None);
    }
}
