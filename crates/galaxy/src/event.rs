use crate::Error;
use ndarray::{Array2, ArrayView2, Axis};

/// A location on a projected plane (usually meters)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// A geolocated, timestamped event.
///
/// `t` counts nanoseconds since the Unix epoch. Keeping time as an integer
/// lets us take exact differences (an `i64` spans roughly ±292 years).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Event {
    pub s: Point,
    pub t: i64,
}

impl Event {
    pub fn new(x: f64, y: f64, t: i64) -> Self {
        Event {
            s: Point::new(x, y),
            t,
        }
    }
}

/// A borrowed, read-only collection of events.
///
/// We place the following constraints on the contained data:
/// - `positions` has shape `(2, n_events)`. Axis 0 is the slow axis and holds
///   the x and y components; axis 1 is indexed by event.
/// - `timestamps` holds one entry per event.
///
/// The index of an event is its identity. Two events with identical
/// coordinates and timestamps at different indices are distinct events.
#[derive(Clone, Copy)]
pub struct EventSet<'a> {
    positions: ArrayView2<'a, f64>,
    timestamps: &'a [i64],
    n_events: usize,
}

impl<'a> EventSet<'a> {
    /// create a new instance
    pub fn new(positions: ArrayView2<'a, f64>, timestamps: &'a [i64]) -> Result<Self, Error> {
        if positions.len_of(Axis(0)) != 2 {
            Err(Error::event_shape(
                "positions must hold exactly 2 components (x, y) along axis 0",
            ))
        } else if positions.len_of(Axis(1)) != timestamps.len() {
            Err(Error::event_shape(
                "positions and timestamps must describe the same number of events",
            ))
        } else {
            Ok(EventSet {
                positions,
                timestamps,
                n_events: timestamps.len(),
            })
        }
    }

    pub fn len(&self) -> usize {
        self.n_events
    }

    pub fn is_empty(&self) -> bool {
        self.n_events == 0
    }

    /// Returns the event at index `idx`.
    ///
    /// # Panics
    /// Panics if `idx` is out of bounds.
    #[inline(always)]
    pub fn get(&self, idx: usize) -> Event {
        Event {
            s: Point {
                x: self.positions[[0, idx]],
                y: self.positions[[1, idx]],
            },
            t: self.timestamps[idx],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Event> + '_ {
        (0..self.n_events).map(|idx| self.get(idx))
    }
}

/// Owns the storage viewed by an [`EventSet`].
#[derive(Clone, Debug)]
pub struct Events {
    positions: Array2<f64>,
    timestamps: Vec<i64>,
}

impl Events {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn view(&self) -> EventSet<'_> {
        EventSet {
            positions: self.positions.view(),
            timestamps: &self.timestamps,
            n_events: self.timestamps.len(),
        }
    }
}

impl FromIterator<Event> for Events {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        let events: Vec<Event> = iter.into_iter().collect();
        let positions = Array2::from_shape_fn((2, events.len()), |(comp, idx)| {
            if comp == 0 {
                events[idx].s.x
            } else {
                events[idx].s.y
            }
        });
        Events {
            positions,
            timestamps: events.iter().map(|event| event.t).collect(),
        }
    }
}

impl From<&[Event]> for Events {
    fn from(events: &[Event]) -> Self {
        events.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_set_shape_errors() {
        let positions = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let timestamps = [0_i64, 1, 2];

        // 3 components along axis 0
        let view = ArrayView2::from_shape((3, 2), &positions).unwrap();
        assert!(EventSet::new(view, &timestamps[..2]).is_err());

        // mismatched event count
        let view = ArrayView2::from_shape((2, 3), &positions).unwrap();
        assert!(EventSet::new(view, &timestamps[..2]).is_err());

        let events = EventSet::new(view, &timestamps).unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events.get(1), Event::new(1.0, 4.0, 1));
    }

    #[test]
    fn events_round_trip_through_view() {
        let input = vec![
            Event::new(0.0, 0.5, 10),
            Event::new(100.0, -3.0, 20),
            Event::new(5000.0, 7.0, -30),
        ];
        let events = Events::from(input.as_slice());
        assert_eq!(events.len(), 3);
        let collected: Vec<Event> = events.view().iter().collect();
        assert_eq!(collected, input);
    }

    #[test]
    fn empty_events() {
        let events: Events = std::iter::empty().collect();
        assert!(events.is_empty());
        assert!(events.view().is_empty());
    }
}
