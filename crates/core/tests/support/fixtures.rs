use chrono::{NaiveDate, Utc};
use slotgrid_core::grid;
use slotgrid_domain::types::{
    CalendarEvent, EventStatus, ProgramRef, RoomRef, SessionType, SubjectRef, TeacherRef,
};

/// Builder for test events; defaults to a Monday-morning lecture with no
/// conflicts and plenty of room capacity.
pub struct EventFixture {
    event: CalendarEvent,
}

impl EventFixture {
    pub fn new(id: &str) -> Self {
        Self {
            event: CalendarEvent {
                id: id.to_string(),
                title: format!("Session {id}"),
                description: None,
                subject: SubjectRef {
                    id: "sub_alg".to_string(),
                    name: "Algorithms".to_string(),
                    code: "CS201".to_string(),
                    color: Some("#2d7ff9".to_string()),
                },
                teacher: TeacherRef { id: "t_1".to_string(), name: "Dr. Ionescu".to_string() },
                room: RoomRef {
                    id: "r_1".to_string(),
                    name: "A101".to_string(),
                    capacity: 100,
                    building: Some("A".to_string()),
                },
                programs: vec![ProgramRef {
                    id: format!("prog_{id}"),
                    name: format!("Cohort {id}"),
                    enrolled: 30,
                }],
                date: NaiveDate::from_ymd_opt(2024, 10, 7).unwrap(),
                start_time: "09:00".to_string(),
                end_time: "10:00".to_string(),
                duration_minutes: 60,
                recurring: false,
                recurrence_pattern: None,
                session_type: SessionType::Lecture,
                status: EventStatus::Scheduled,
                prior_status: None,
                conflicts: Vec::new(),
                created_by: "fixture".to_string(),
                last_modified: Utc::now(),
            },
        }
    }

    pub fn teacher(mut self, id: &str) -> Self {
        self.event.teacher = TeacherRef { id: id.to_string(), name: format!("Teacher {id}") };
        self
    }

    pub fn room(mut self, id: &str, capacity: u32) -> Self {
        self.event.room = RoomRef {
            id: id.to_string(),
            name: format!("Room {id}"),
            capacity,
            building: None,
        };
        self
    }

    pub fn program(mut self, id: &str, enrolled: u32) -> Self {
        self.event.programs =
            vec![ProgramRef { id: id.to_string(), name: format!("Cohort {id}"), enrolled }];
        self
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.event.date = date;
        self
    }

    /// Set start and end; duration is recomputed to keep the invariant.
    pub fn at(mut self, start: &str, end: &str) -> Self {
        self.event.duration_minutes =
            grid::time_to_minutes(end).unwrap() - grid::time_to_minutes(start).unwrap();
        self.event.start_time = start.to_string();
        self.event.end_time = end.to_string();
        self
    }

    pub fn session_type(mut self, session_type: SessionType) -> Self {
        self.event.session_type = session_type;
        self
    }

    pub fn status(mut self, status: EventStatus) -> Self {
        self.event.status = status;
        self
    }

    pub fn build(self) -> CalendarEvent {
        self.event
    }
}

/// Monday of the standard test week.
pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 10, 7).unwrap()
}
