//! # Async Resource State
//!
//! [`AsyncResource`] is the value a Resource Store holds: the status of the most
//! recent invocation, the last good data, the last error, and the version counter
//! used for stale-response suppression.
//!
//! All mutation goes through [`AsyncResource::apply`], a pure reducer over
//! [`Lifecycle`] events. The reducer implements this table and nothing else:
//!
//! | Current   | Event                 | Next        | Effect                      |
//! |-----------|-----------------------|-------------|-----------------------------|
//! | any       | `Pending`             | `Loading`   | clear error, bump version   |
//! | `Loading` | `Fulfilled` (latest)  | `Succeeded` | set data, clear error       |
//! | `Loading` | `Rejected` (latest)   | `Failed`    | set error, clear data       |
//! | any       | `Reset`               | `Idle`      | clear data and error        |
//!
//! Every other combination is discarded and leaves the state untouched.

use std::fmt::Debug;

/// Which phase the resource is in. Exactly one holds at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// Events emitted by a Resource Action over its lifetime.
#[derive(Debug, Clone, PartialEq)]
pub enum Lifecycle<R> {
    Pending,
    Fulfilled { version: u64, data: R },
    Rejected { version: u64, message: String },
    Reset,
}

/// What a single [`AsyncResource::apply`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A new invocation began and was assigned this version.
    Started(u64),
    /// The event moved the resource to a new status.
    Committed(Status),
    /// The event was stale or not valid in the current status.
    Discarded,
}

/// The state of one remote resource as seen by the console.
#[derive(Debug, Clone, PartialEq)]
pub struct AsyncResource<R> {
    status: Status,
    data: Option<R>,
    error: Option<String>,
    request_version: u64,
}

impl<R> Default for AsyncResource<R> {
    fn default() -> Self {
        Self {
            status: Status::Idle,
            data: None,
            error: None,
            request_version: 0,
        }
    }
}

impl<R: Clone + Debug> AsyncResource<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Last successful data. Still available while a refresh is loading.
    pub fn data(&self) -> Option<&R> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn request_version(&self) -> u64 {
        self.request_version
    }

    pub fn is_loading(&self) -> bool {
        self.status == Status::Loading
    }

    /// Starts a new invocation and returns its version.
    pub fn begin(&mut self) -> u64 {
        self.request_version += 1;
        self.status = Status::Loading;
        self.error = None;
        self.request_version
    }

    /// Applies one lifecycle event.
    pub fn apply(&mut self, event: Lifecycle<R>) -> Transition {
        match event {
            Lifecycle::Pending => Transition::Started(self.begin()),
            Lifecycle::Fulfilled { version, data } => {
                if !self.accepts(version) {
                    return Transition::Discarded;
                }
                self.status = Status::Succeeded;
                self.data = Some(data);
                self.error = None;
                Transition::Committed(Status::Succeeded)
            }
            Lifecycle::Rejected { version, message } => {
                if !self.accepts(version) {
                    return Transition::Discarded;
                }
                self.status = Status::Failed;
                self.error = Some(message);
                self.data = None;
                Transition::Committed(Status::Failed)
            }
            Lifecycle::Reset => {
                self.status = Status::Idle;
                self.data = None;
                self.error = None;
                Transition::Committed(Status::Idle)
            }
        }
    }

    fn accepts(&self, version: u64) -> bool {
        self.status == Status::Loading && version == self.request_version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn loading_at(version: u64) -> AsyncResource<Vec<u32>> {
        let mut res = AsyncResource::new();
        for _ in 0..version {
            res.apply(Lifecycle::Pending);
        }
        res
    }

    #[test]
    fn starts_idle_and_empty() {
        let res = AsyncResource::<u32>::new();
        assert_eq!(res.status(), Status::Idle);
        assert!(res.data().is_none());
        assert!(res.error().is_none());
        assert_eq!(res.request_version(), 0);
    }

    #[test]
    fn pending_bumps_version_and_clears_error() {
        let mut res = loading_at(1);
        res.apply(Lifecycle::Rejected {
            version: 1,
            message: "boom".into(),
        });
        assert_eq!(res.error(), Some("boom"));

        assert_eq!(res.apply(Lifecycle::Pending), Transition::Started(2));
        assert_eq!(res.status(), Status::Loading);
        assert!(res.error().is_none());
    }

    #[test]
    fn loading_keeps_stale_data_for_display() {
        let mut res = loading_at(1);
        res.apply(Lifecycle::Fulfilled {
            version: 1,
            data: vec![1, 2, 3],
        });
        res.apply(Lifecycle::Pending);
        assert!(res.is_loading());
        assert_eq!(res.data(), Some(&vec![1, 2, 3]));
    }

    #[test]
    fn matching_fulfilled_commits() {
        let mut res = loading_at(1);
        let t = res.apply(Lifecycle::Fulfilled {
            version: 1,
            data: vec![7],
        });
        assert_eq!(t, Transition::Committed(Status::Succeeded));
        assert_eq!(res.data(), Some(&vec![7]));
    }

    #[test]
    fn stale_fulfilled_is_discarded() {
        let mut res = loading_at(2);
        let t = res.apply(Lifecycle::Fulfilled {
            version: 1,
            data: vec![1],
        });
        assert_eq!(t, Transition::Discarded);
        assert_eq!(res.status(), Status::Loading);
        assert!(res.data().is_none());
    }

    #[test]
    fn older_result_after_newer_is_discarded() {
        let mut res = loading_at(2);
        res.apply(Lifecycle::Fulfilled {
            version: 2,
            data: vec![2],
        });
        let t = res.apply(Lifecycle::Fulfilled {
            version: 1,
            data: vec![1],
        });
        assert_eq!(t, Transition::Discarded);
        assert_eq!(res.data(), Some(&vec![2]));
    }

    #[test]
    fn rejection_clears_data_so_both_are_never_set() {
        let mut res = loading_at(1);
        res.apply(Lifecycle::Fulfilled {
            version: 1,
            data: vec![1],
        });
        res.apply(Lifecycle::Pending);
        res.apply(Lifecycle::Rejected {
            version: 2,
            message: "nope".into(),
        });
        assert_eq!(res.status(), Status::Failed);
        assert!(res.data().is_none());
        assert_eq!(res.error(), Some("nope"));
    }

    #[test]
    fn settle_outside_loading_is_discarded() {
        let mut res = AsyncResource::<u32>::new();
        let t = res.apply(Lifecycle::Fulfilled { version: 0, data: 1 });
        assert_eq!(t, Transition::Discarded);
        assert_eq!(res.status(), Status::Idle);
    }

    #[test]
    fn reset_returns_to_idle_and_drops_late_results() {
        let mut res = loading_at(1);
        res.apply(Lifecycle::Reset);
        assert_eq!(res.status(), Status::Idle);

        let t = res.apply(Lifecycle::Fulfilled { version: 1, data: vec![9] });
        assert_eq!(t, Transition::Discarded);
        assert!(res.data().is_none());
    }

    #[test]
    fn begin_returns_each_new_version() {
        let mut res = AsyncResource::<u32>::new();
        assert_eq!(res.begin(), 1);
        assert_eq!(res.begin(), 2);
        assert_eq!(res.status(), Status::Loading);
        assert_eq!(res.request_version(), 2);
    }

    /// An event whose version is picked relative to the state it lands on.
    #[derive(Debug, Clone)]
    enum Step {
        Pending,
        Fulfilled { offset: i8, data: u32 },
        Rejected { offset: i8 },
        Reset,
    }

    impl Step {
        fn event(&self, current: u64) -> Lifecycle<u32> {
            let at = |offset: i8| current.saturating_add_signed(i64::from(offset));
            match self {
                Step::Pending => Lifecycle::Pending,
                Step::Fulfilled { offset, data } => Lifecycle::Fulfilled {
                    version: at(*offset),
                    data: *data,
                },
                Step::Rejected { offset } => Lifecycle::Rejected {
                    version: at(*offset),
                    message: "err".into(),
                },
                Step::Reset => Lifecycle::Reset,
            }
        }
    }

    fn arb_step() -> impl Strategy<Value = Step> {
        prop_oneof![
            Just(Step::Pending),
            (-2i8..=1, any::<u32>()).prop_map(|(offset, data)| Step::Fulfilled { offset, data }),
            (-2i8..=1).prop_map(|offset| Step::Rejected { offset }),
            Just(Step::Reset),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn event_sequences_stay_on_the_table(steps in prop::collection::vec(arb_step(), 1..64)) {
            let mut res = AsyncResource::<u32>::new();
            for step in steps {
                let event = step.event(res.request_version());
                let before = res.clone();
                let t = res.apply(event.clone());
                match (&event, t) {
                    (Lifecycle::Pending, Transition::Started(v)) => {
                        prop_assert_eq!(v, before.request_version() + 1);
                        prop_assert_eq!(res.status(), Status::Loading);
                        prop_assert!(res.error().is_none());
                    }
                    (Lifecycle::Fulfilled { version, .. }, Transition::Committed(Status::Succeeded))
                    | (Lifecycle::Rejected { version, .. }, Transition::Committed(Status::Failed)) => {
                        prop_assert_eq!(before.status(), Status::Loading);
                        prop_assert_eq!(*version, before.request_version());
                    }
                    (Lifecycle::Reset, Transition::Committed(Status::Idle)) => {
                        prop_assert!(res.data().is_none() && res.error().is_none());
                    }
                    (_, Transition::Discarded) => prop_assert_eq!(&res, &before),
                    (event, t) => prop_assert!(false, "{:?} gave {:?}", event, t),
                }
                prop_assert!(!(res.data().is_some() && res.error().is_some()));
            }
        }

        #[test]
        fn stale_versions_never_touch_data_or_error(
            steps in prop::collection::vec(arb_step(), 0..32),
            data in any::<u32>(),
            behind in 1u64..4,
        ) {
            let mut res = AsyncResource::<u32>::new();
            for step in steps {
                let event = step.event(res.request_version());
                res.apply(event);
            }
            let stale = res.request_version().saturating_sub(behind);
            let before = res.clone();

            prop_assert_eq!(res.apply(Lifecycle::Fulfilled { version: stale, data }), Transition::Discarded);
            prop_assert_eq!(
                res.apply(Lifecycle::Rejected { version: stale, message: "late".into() }),
                Transition::Discarded
            );
            prop_assert_eq!(res, before);
        }
    }
}
