//! Deterministic demo roster: employees and shift requirements for a date range.
//!
//! Same seed, same roster. Used by plan-runner and the determinism tests.

use crate::{
    model::{EmployeeAvailability, ExperienceLevel, Priority, ShiftRequirement},
    rng::{DemoRng, Stream},
    time::{DayPart, TimeOfDay, TimeRange},
};
use chrono::{Datelike, Duration, NaiveDate, Weekday};

pub const POSITIONS: [&str; 4] = ["cashier", "stylist", "technician", "manager"];

const FIRST_NAMES: [&str; 24] = [
    "Ana", "Ben", "Chloe", "Dev", "Elena", "Farid", "Grace", "Hugo", "Ines", "Jonas",
    "Keiko", "Luis", "Maya", "Nadia", "Omar", "Priya", "Quinn", "Rosa", "Sam", "Tomas",
    "Uma", "Victor", "Wen", "Yara",
];

const LAST_NAMES: [&str; 16] = [
    "Alvarez", "Brooks", "Chen", "Dubois", "Evans", "Fischer", "Garcia", "Haddad",
    "Ito", "Jensen", "Kowalski", "Lopez", "Moreau", "Nakamura", "Okafor", "Patel",
];

const WEEK: [Weekday; 7] = [
    Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu,
    Weekday::Fri, Weekday::Sat, Weekday::Sun,
];

/// (window, likely day-part preference)
const WINDOWS: [((u32, u32), DayPart); 3] = [
    ((6, 22), DayPart::Afternoon),
    ((6, 14), DayPart::Morning),
    ((12, 23), DayPart::Evening),
];

const SLOTS: [(u32, u32); 2] = [(8, 16), (14, 22)];

#[derive(Debug, Clone)]
pub struct DemoRoster {
    pub employees:    Vec<EmployeeAvailability>,
    pub requirements: Vec<ShiftRequirement>,
}

impl DemoRoster {
    pub fn generate(seed: u64, start: NaiveDate, end: NaiveDate, headcount: usize) -> Self {
        let mut rng = DemoRng::new(seed, Stream::Employees);
        let employees = (0..headcount).map(|i| demo_employee(&mut rng, i)).collect();

        let mut rng = DemoRng::new(seed, Stream::Requirements);
        let mut requirements = Vec::new();
        let mut date = start;
        while date <= end {
            requirements.extend(demo_requirements(&mut rng, date));
            date += Duration::days(1);
        }

        Self { employees, requirements }
    }
}

fn hours_range(start: u32, end: u32) -> TimeRange {
    TimeRange {
        start: TimeOfDay::at_hour(start),
        end:   TimeOfDay::at_hour(end),
    }
}

fn demo_employee(rng: &mut DemoRng, index: usize) -> EmployeeAvailability {
    let name = format!("{} {}", rng.pick(&FIRST_NAMES), rng.pick(&LAST_NAMES));
    let position = *rng.pick(&POSITIONS);
    let rate = (rng.between(15.0, 45.0) * 2.0).round() / 2.0;

    let experience = match rng.next_u64_below(3) {
        0 => ExperienceLevel::Junior,
        1 => ExperienceLevel::Mid,
        _ => ExperienceLevel::Senior,
    };

    let mut employee = EmployeeAvailability::new(format!("emp-{:03}", index + 1), name, position, rate)
        .with_scores(
            rng.between(40.0, 100.0).round(),
            rng.between(40.0, 100.0).round(),
        )
        .with_experience(experience)
        .with_max_hours(*rng.pick(&[24.0, 32.0, 40.0]));

    let (window, part) = *rng.pick(&WINDOWS);
    let days_off = rng.next_u64_below(3) as usize + 1;
    let first_off = rng.next_u64_below(7) as usize;
    for (i, day) in WEEK.iter().enumerate() {
        let off = (i + 7 - first_off) % 7 < days_off;
        if !off {
            employee = employee.with_window(*day, hours_range(window.0, window.1));
        }
    }

    if rng.chance(0.6) {
        employee = employee.with_preferred_slot(part);
    }
    if rng.chance(0.5) {
        employee = employee.with_preferred_position(position);
    }
    if rng.chance(0.15) {
        employee = employee.with_preferred_position(*rng.pick(&POSITIONS));
    }
    employee.skills.insert(format!("{position}-basics"));
    employee
}

fn demo_requirements(rng: &mut DemoRng, date: NaiveDate) -> Vec<ShiftRequirement> {
    let weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
    let mut out = Vec::new();
    for position in POSITIONS {
        for &(start, end) in &SLOTS {
            let (staff, priority) = if position == "manager" {
                (1, Priority::Critical)
            } else if weekend {
                (rng.next_u64_below(2) as u32 + 2, Priority::High)
            } else {
                let priority = if rng.chance(0.5) { Priority::Medium } else { Priority::Low };
                (rng.next_u64_below(2) as u32 + 1, priority)
            };
            let mut requirement = ShiftRequirement::new(date, hours_range(start, end), position, staff, priority)
                .with_complexity((rng.between(0.8, 1.5) * 10.0).round() / 10.0);
            requirement.expected_volume = rng.between(10.0, 100.0).round();
            out.push(requirement);
        }
    }
    out
}
