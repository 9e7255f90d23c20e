pub mod availability;
#[cfg(feature = "client")]
pub mod client;
pub mod identity;
pub mod notice;
pub mod planner;
pub mod routing;
pub mod session;
pub mod sessions;
pub mod slot;
pub mod test_utils;
pub mod time;

#[cfg(test)]
mod tests {
    use crate::availability::{Availability, AvailabilityError};
    use crate::test_utils::FixedClock;
    use crate::time::ClockTime;
    use chrono::NaiveDate;

    /// Noon on 2026-03-02, the fixed "now" for every store test.
    fn clock() -> FixedClock {
        FixedClock(
            NaiveDate::from_ymd_opt(2026, 3, 2)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        )
    }

    /// A day comfortably after the fixed clock.
    fn next_monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 9).unwrap()
    }

    fn at(hour: u8, minute: u8) -> Option<ClockTime> {
        Some(ClockTime::new(hour, minute).unwrap())
    }

    #[test]
    fn adds_disjoint_slots_and_lists_them_sorted() {
        let day = next_monday();
        let mut availability = Availability::with_clock(clock());

        // Inserted out of order on purpose.
        let later = availability.add_slot(day, at(14, 0), at(15, 0)).unwrap();
        let earlier = availability.add_slot(day, at(9, 0), at(10, 0)).unwrap();

        assert_eq!(availability.slots_on(day), [earlier, later]);
        assert_eq!(availability.slot_count(), 2);
    }

    #[test]
    fn second_identical_slot_is_an_overlap() {
        let day = next_monday();
        let mut availability = Availability::with_clock(clock());

        availability.add_slot(day, at(9, 0), at(10, 0)).unwrap();

        assert_eq!(
            availability.add_slot(day, at(9, 0), at(10, 0)),
            Err(AvailabilityError::Overlap)
        );
        assert_eq!(
            availability.add_slot(day, at(9, 30), at(10, 30)),
            Err(AvailabilityError::Overlap)
        );
        assert_eq!(availability.slot_count(), 1);
    }

    #[test]
    fn adjacent_slots_do_not_collide() {
        let day = next_monday();
        let mut availability = Availability::with_clock(clock());

        availability.add_slot(day, at(9, 0), at(10, 0)).unwrap();

        // Shared endpoint: [9,10) then [10,11) is fine under strict `<`.
        assert!(availability.add_slot(day, at(10, 0), at(11, 0)).is_ok());
    }

    #[test]
    fn same_day_other_days_do_not_interact() {
        let monday = next_monday();
        let tuesday = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let mut availability = Availability::with_clock(clock());

        availability.add_slot(monday, at(9, 0), at(10, 0)).unwrap();

        // The same interval on another day is not an overlap.
        assert!(availability.add_slot(tuesday, at(9, 0), at(10, 0)).is_ok());
        assert_eq!(availability.slots_on(monday).len(), 1);
        assert_eq!(availability.slots_on(tuesday).len(), 1);
    }

    #[test]
    fn inverted_or_empty_range_is_rejected() {
        let day = next_monday();
        let mut availability = Availability::with_clock(clock());

        assert_eq!(
            availability.add_slot(day, at(10, 0), at(9, 0)),
            Err(AvailabilityError::InvalidRange)
        );
        assert_eq!(
            availability.add_slot(day, at(10, 0), at(10, 0)),
            Err(AvailabilityError::InvalidRange)
        );
        assert!(availability.is_empty());
    }

    #[test]
    fn start_before_now_is_rejected() {
        let mut availability = Availability::with_clock(clock());
        let today = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let yesterday = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();

        assert_eq!(
            availability.add_slot(today, at(9, 0), at(10, 0)),
            Err(AvailabilityError::PastSlot)
        );
        assert_eq!(
            availability.add_slot(yesterday, at(13, 0), at(14, 0)),
            Err(AvailabilityError::PastSlot)
        );

        // Exactly now is not strictly before now.
        assert!(availability.add_slot(today, at(12, 0), at(13, 0)).is_ok());
    }

    #[test]
    fn missing_times_are_reported_first() {
        let mut availability = Availability::with_clock(clock());
        let yesterday = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();

        // Incomplete input wins even when the day is already in the past.
        assert_eq!(
            availability.add_slot(yesterday, None, at(10, 0)),
            Err(AvailabilityError::IncompleteInput)
        );
        assert_eq!(
            availability.add_slot(yesterday, at(9, 0), None),
            Err(AvailabilityError::IncompleteInput)
        );
        assert_eq!(
            availability.add_slot(yesterday, None, None),
            Err(AvailabilityError::IncompleteInput)
        );
    }

    #[test]
    fn removal_is_idempotent() {
        use uuid::Uuid;

        let day = next_monday();
        let mut availability = Availability::with_clock(clock());
        let slot = availability.add_slot(day, at(9, 0), at(10, 0)).unwrap();

        // Unknown ids and absent days are quietly ignored.
        availability.remove_slot(day, Uuid::new_v4());
        availability.remove_slot(NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(), slot.id);
        assert_eq!(availability.slots_on(day).len(), 1);

        availability.remove_slot(day, slot.id);
        assert!(availability.slots_on(day).is_empty());
        availability.remove_slot(day, slot.id);
        assert!(availability.is_empty());
    }

    #[test]
    fn removed_interval_can_be_reused() {
        let day = next_monday();
        let mut availability = Availability::with_clock(clock());

        let slot = availability.add_slot(day, at(9, 0), at(10, 0)).unwrap();
        availability.remove_slot(day, slot.id);

        let again = availability.add_slot(day, at(9, 0), at(10, 0)).unwrap();
        assert_ne!(slot.id, again.id);
    }

    #[test]
    fn formats_ranges_on_the_twelve_hour_clock() {
        let day = next_monday();
        let mut availability = Availability::with_clock(clock());

        let morning = availability.add_slot(day, at(0, 0), at(12, 0)).unwrap();
        assert_eq!(morning.format_range(), "12:00 AM - 12:00 PM");

        let afternoon = availability.add_slot(day, at(13, 5), at(13, 45)).unwrap();
        assert_eq!(afternoon.format_range(), "1:05 PM - 1:45 PM");
    }

    #[test]
    fn picker_resolution_handles_noon_and_midnight() {
        use crate::time::{Period, TimeSelection};

        let midnight = TimeSelection::new(12, 0, Period::Am).unwrap();
        assert_eq!(midnight.resolve().hour(), 0);

        let noon = TimeSelection::new(12, 0, Period::Pm).unwrap();
        assert_eq!(noon.resolve().hour(), 12);

        let evening = TimeSelection::new(9, 0, Period::Pm).unwrap();
        assert_eq!(evening.resolve().hour(), 21);

        let morning = TimeSelection::new(9, 0, Period::Am).unwrap();
        assert_eq!(morning.resolve().hour(), 9);
    }

    #[test]
    fn picker_rejects_off_grid_readings() {
        use crate::time::{Period, TimeSelection};

        assert!(TimeSelection::new(0, 0, Period::Am).is_err());
        assert!(TimeSelection::new(13, 0, Period::Am).is_err());
        assert!(TimeSelection::new(9, 20, Period::Am).is_err());
        assert!(TimeSelection::new(9, 45, Period::Pm).is_ok());
    }

    #[test]
    fn picker_round_trips_an_existing_time() {
        use crate::time::{Period, TimeSelection};

        let stored = ClockTime::new(13, 45).unwrap();
        let reopened = TimeSelection::from_clock_time(stored);

        assert_eq!(reopened.hour(), 1);
        assert_eq!(reopened.period(), Period::Pm);
        assert_eq!(reopened.resolve(), stored);

        let midnight = TimeSelection::from_clock_time(ClockTime::new(0, 15).unwrap());
        assert_eq!(midnight.hour(), 12);
        assert_eq!(midnight.period(), Period::Am);
    }

    #[test]
    fn draft_clears_candidates_only_on_success() {
        use crate::planner::SlotDraft;

        let mut availability = Availability::with_clock(clock());
        let mut draft = SlotDraft::new(next_monday());

        draft.set_start(ClockTime::new(9, 0).unwrap());
        assert_eq!(
            draft.commit(&mut availability),
            Err(AvailabilityError::IncompleteInput)
        );
        assert!(draft.start.is_some());

        draft.set_end(ClockTime::new(10, 0).unwrap());
        assert!(draft.commit(&mut availability).is_ok());
        assert_eq!(draft.start, None);
        assert_eq!(draft.end, None);
        assert_eq!(availability.slots_on(next_monday()).len(), 1);
    }

    #[test]
    fn upcoming_days_spans_a_week() {
        use crate::planner::{day_heading, upcoming_days};

        let today = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let strip = upcoming_days(today, 7);

        assert_eq!(strip.len(), 7);
        assert_eq!(strip[0], today);
        assert_eq!(strip[6], NaiveDate::from_ymd_opt(2026, 3, 8).unwrap());
        assert_eq!(day_heading(today), "Monday, March 2");
    }

    #[test]
    fn guard_redirects_wrong_role_to_its_home() {
        use crate::routing::Route;
        use crate::session::{resolve_access, AccessDecision, AuthRecord, Role};

        let student = AuthRecord {
            authenticated: true,
            role: Role::Student,
        };

        assert_eq!(
            resolve_access(Some(&student), &[Role::Mentor]),
            AccessDecision::WrongRole(Route::Student)
        );
        assert_eq!(
            resolve_access(Some(&student), &[Role::Student]),
            AccessDecision::Authorized
        );
    }

    #[test]
    fn guard_treats_unauthenticated_records_as_absent() {
        use crate::session::{resolve_access, AccessDecision, AuthRecord, Role};

        let stale = AuthRecord {
            authenticated: false,
            role: Role::Mentor,
        };

        assert_eq!(
            resolve_access(Some(&stale), &[Role::Mentor]),
            AccessDecision::Unauthenticated
        );
        assert_eq!(
            resolve_access(None, &[Role::Mentor]),
            AccessDecision::Unauthenticated
        );
    }

    #[test]
    fn unknown_role_redirects_to_role_selection() {
        use crate::routing::Route;
        use crate::session::{resolve_access, AccessDecision, AuthRecord, Role};

        let record: AuthRecord =
            serde_json::from_str(r#"{ "authenticated": true, "role": "ta" }"#).unwrap();
        assert_eq!(record.role, Role::Unknown);

        assert_eq!(
            resolve_access(Some(&record), &[Role::Mentor]),
            AccessDecision::WrongRole(Route::SelectRole)
        );
    }

    #[test]
    fn navigation_covers_the_whole_route_table() {
        use crate::routing::{navigate, Route};
        use crate::session::{AuthRecord, Role};

        let mentor = AuthRecord {
            authenticated: true,
            role: Role::Mentor,
        };

        assert_eq!(navigate("/", None), Route::Login);
        assert_eq!(navigate("/mentor", None), Route::Login);
        assert_eq!(navigate("/mentor", Some(&mentor)), Route::Mentor);
        assert_eq!(navigate("/admin", Some(&mentor)), Route::Mentor);
        assert_eq!(navigate("/no-such-view", Some(&mentor)), Route::NotFound);
        assert_eq!(Route::from_path("/select-role"), Route::SelectRole);
    }

    #[test]
    fn session_store_round_trips_the_auth_record() {
        use crate::session::{AuthRecord, Role, SessionStore, AUTH_KEY};

        let mut store = SessionStore::new();
        assert_eq!(store.read_auth(), None);

        let record = AuthRecord {
            authenticated: true,
            role: Role::Mentor,
        };
        store.write_auth(&record);
        assert_eq!(
            store.get_key(AUTH_KEY),
            Some(r#"{"authenticated":true,"role":"mentor"}"#)
        );
        assert_eq!(store.read_auth(), Some(record));

        store.clear_auth();
        assert_eq!(store.read_auth(), None);
    }

    #[test]
    fn unreadable_session_record_reads_as_absent() {
        use crate::session::{SessionStore, AUTH_KEY};

        let mut store = SessionStore::new();
        store.set_key(AUTH_KEY, "not json".to_string());

        assert_eq!(store.read_auth(), None);
    }

    #[test]
    fn login_response_folds_to_id_or_first_error() {
        use crate::identity::{login_outcome, GraphqlResponse, IdentityError, LoginData};

        let accepted: GraphqlResponse<LoginData> =
            serde_json::from_str(r#"{ "data": { "login": { "id": "u-91" } } }"#).unwrap();
        assert_eq!(login_outcome(accepted).unwrap(), "u-91");

        let refused: GraphqlResponse<LoginData> = serde_json::from_str(
            r#"{ "data": { "login": null }, "errors": [{ "message": "Account locked" }] }"#,
        )
        .unwrap();
        match login_outcome(refused) {
            Err(IdentityError::Rejected(message)) => assert_eq!(message, "Account locked"),
            other => panic!("expected a rejection, got {:?}", other),
        }
    }

    #[test]
    fn silent_login_failure_uses_the_fallback_message() {
        use crate::identity::{
            login_outcome, GraphqlResponse, IdentityError, LoginData, LOGIN_FALLBACK_ERROR,
        };

        let empty: GraphqlResponse<LoginData> = serde_json::from_str(r#"{}"#).unwrap();
        match login_outcome(empty) {
            Err(IdentityError::Rejected(message)) => assert_eq!(message, LOGIN_FALLBACK_ERROR),
            other => panic!("expected a rejection, got {:?}", other),
        }
    }

    #[test]
    fn auth_me_response_yields_the_session_and_landing_route() {
        use crate::identity::{auth_outcome, session_for, AuthMeData, GraphqlResponse};
        use crate::routing::Route;
        use crate::session::Role;

        let response: GraphqlResponse<AuthMeData> = serde_json::from_str(
            r#"{
                "data": {
                    "me": {
                        "id": "u-91",
                        "name": "Mentor Smith",
                        "username": "msmith",
                        "role": "mentor",
                        "sections_enrolled": [{ "id": "s-1", "name": "Web Development" }]
                    }
                }
            }"#,
        )
        .unwrap();

        let user = auth_outcome(response).unwrap();
        assert_eq!(user.role, Role::Mentor);
        assert_eq!(user.sections_enrolled.len(), 1);

        let (record, landing) = session_for(&user);
        assert!(record.authenticated);
        assert_eq!(landing, Route::Mentor);
    }

    #[test]
    fn login_request_body_matches_the_wire_format() {
        use crate::identity::{auth_me_request, login_request, LoginInput};

        let body = serde_json::to_value(login_request(LoginInput {
            email: "m@example.com".to_string(),
            password: "hunter2".to_string(),
            remember_me: false,
        }))
        .unwrap();

        assert_eq!(body["operationName"], "login");
        assert_eq!(body["variables"]["input"]["rememberMe"], false);
        assert_eq!(body["variables"]["input"]["email"], "m@example.com");

        let me = serde_json::to_value(auth_me_request()).unwrap();
        assert_eq!(me["operationName"], "getAuthMe");
        assert!(me.get("variables").is_none());
    }

    #[test]
    fn session_feeds_unwrap_their_envelopes() {
        use crate::sessions::{PastSessions, PendingRequests};

        let pending: PendingRequests =
            serde_json::from_str(r#"{ "events": [{ "id": 1 }, { "id": 2 }] }"#).unwrap();
        assert_eq!(pending.events.len(), 2);

        let past: PastSessions =
            serde_json::from_str(r#"{ "Past Events": [{ "id": 3 }] }"#).unwrap();
        assert_eq!(past.past_events.len(), 1);

        // Both feeds tolerate an empty body.
        let none: PendingRequests = serde_json::from_str("{}").unwrap();
        assert!(none.events.is_empty());
    }

    #[test]
    fn notices_expire_after_the_display_interval() {
        use crate::notice::{Notice, NoticeLevel};
        use chrono::Duration;

        let posted = clock().0;
        let notice = Notice::rejection(&AvailabilityError::Overlap, posted);

        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.message, "Time slot overlaps with an existing slot!");
        assert!(!notice.expired(posted + Duration::milliseconds(2999)));
        assert!(notice.expired(posted + Duration::milliseconds(3000)));
    }

    #[test]
    fn clock_time_survives_its_wire_form() {
        let quarter = ClockTime::new(13, 45).unwrap();
        let json = serde_json::to_string(&quarter).unwrap();

        assert_eq!(json, r#""13:45""#);
        assert_eq!(serde_json::from_str::<ClockTime>(&json).unwrap(), quarter);
        assert!(serde_json::from_str::<ClockTime>(r#""24:00""#).is_err());
    }
}
