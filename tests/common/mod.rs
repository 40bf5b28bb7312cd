#![allow(dead_code)]

use capacity_planner::{
    Allocation, Consultant, Customer, Project, ProjectType, Snapshot, Team, WeekKey, WorkCalendar,
};
use chrono::NaiveDate;

pub const ALICE: i64 = 1;
pub const BOB: i64 = 2;
pub const CAROL: i64 = 3;
pub const DAN: i64 = 4;

pub const ACME: i64 = 1;
pub const GLOBEX: i64 = 2;
pub const IN_HOUSE: i64 = 3;

pub const APOLLO: i64 = 10;
pub const BOREALIS: i64 = 11;
pub const TOOLING: i64 = 12;
pub const VACATION: i64 = 13;
pub const LEGACY: i64 = 14;

pub fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn wk(year: i32, week: u32) -> WeekKey {
    WeekKey::new(year, week).unwrap()
}

pub fn standard_calendar() -> WorkCalendar {
    WorkCalendar::new(1, "Standard", 40.0)
}

/// Four consultants over two calendars, one of which is missing:
///
/// - Alice: 100% work, 20% overhead -> 40 capacity, 32 billable
/// - Bob: 50% work, no overhead -> 20 capacity, 20 billable
/// - Carol: references calendar 99, which is not in the snapshot
/// - Dan: 0% work -> no capacity
pub fn sample_snapshot() -> Snapshot {
    let consultants = vec![
        Consultant::new(ALICE, "Alice", 1)
            .with_overhead_percentage(20.0)
            .with_team(7),
        Consultant::new(BOB, "Bob", 1)
            .with_work_percentage(50.0)
            .with_team(8),
        Consultant::new(CAROL, "Carol", 99).with_team(7),
        Consultant::new(DAN, "Dan", 1).with_work_percentage(0.0),
    ];

    let customers = vec![
        Customer::new(ACME, "Acme").with_billing(1000.0, "SEK"),
        Customer::new(GLOBEX, "Globex").with_billing(100.0, "EUR"),
        Customer::new(IN_HOUSE, "In-house"),
    ];

    let projects = vec![
        Project::new(APOLLO, "Apollo", ACME, ProjectType::Customer),
        Project::new(BOREALIS, "Borealis", GLOBEX, ProjectType::Customer),
        Project::new(TOOLING, "Tooling", IN_HOUSE, ProjectType::Internal),
        Project::new(VACATION, "Vacation", IN_HOUSE, ProjectType::Absence),
        Project::new(LEGACY, "Legacy", ACME, ProjectType::Customer).inactive(),
    ];

    let allocations = vec![
        Allocation::new(ALICE, APOLLO, 2024, 10, 16.0),
        Allocation::new(BOB, BOREALIS, 2024, 10, 10.0),
        Allocation::new(BOB, TOOLING, 2024, 10, 4.0),
        Allocation::new(CAROL, APOLLO, 2024, 10, 30.0),
        Allocation::new(ALICE, APOLLO, 2024, 11, 40.0),
    ];

    Snapshot {
        calendars: vec![standard_calendar()],
        consultants,
        roles: Vec::new(),
        teams: vec![
            Team {
                id: 7,
                name: "Platform".into(),
            },
            Team {
                id: 8,
                name: "Data".into(),
            },
        ],
        projects,
        customers,
        allocations,
    }
}
