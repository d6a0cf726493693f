//! Overlap-aware lateral layout for a single day column.
//!
//! Every event is indented by `overlap_count * stack_step_px`, where the overlap
//! count is the number of *other* events whose half-open interval intersects its
//! own. Two events with the same count get the same indent even when they overlap
//! each other; that coincidence is accepted.

use chrono::{DateTime, Local, NaiveDate};

use super::mapper::TimeSpaceMapper;
use crate::models::event::{Event, EventId};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Visual floor for short events
    pub min_height_px: f32,
    pub stack_step_px: f32,
}

/// Where the renderer should draw one event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventLayout {
    pub event_id: EventId,
    pub top: f32,
    pub height: f32,
    pub left_offset_px: f32,
    pub overlap_count: usize,
}

impl EventLayout {
    /// Width left for the event inside a column of `container_width` pixels.
    pub fn width_in(&self, container_width: f32) -> f32 {
        (container_width - self.left_offset_px).max(0.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayLayout {
    pub timed: Vec<EventLayout>,
    /// All-day events, kept out of the timed column
    pub all_day: Vec<EventId>,
}

impl DayLayout {
    pub fn get(&self, event_id: EventId) -> Option<&EventLayout> {
        self.timed.iter().find(|layout| layout.event_id == event_id)
    }
}

/// Events that start or end on `date`.
pub fn events_for_day(events: &[Event], date: NaiveDate) -> Vec<&Event> {
    events
        .iter()
        .filter(|e| e.start.date_naive() == date || e.end.date_naive() == date)
        .collect()
}

/// Overlap count per event, in input order.
///
/// Sweep over sorted boundaries: an event `e` is intersected by every event that
/// starts before `e.end`, minus those that already ended by `e.start`, minus
/// itself. Requires `end > start` for every event.
pub fn overlap_counts(events: &[&Event]) -> Vec<usize> {
    let mut starts: Vec<DateTime<Local>> = events.iter().map(|e| e.start).collect();
    let mut ends: Vec<DateTime<Local>> = events.iter().map(|e| e.end).collect();
    starts.sort_unstable();
    ends.sort_unstable();

    events
        .iter()
        .map(|event| {
            let started_before_end = starts.partition_point(|s| *s < event.end);
            let ended_by_start = ends.partition_point(|e| *e <= event.start);
            started_before_end
                .saturating_sub(ended_by_start)
                .saturating_sub(1)
        })
        .collect()
}

/// Quadratic reference implementation of [`overlap_counts`].
pub fn overlap_counts_pairwise(events: &[&Event]) -> Vec<usize> {
    events
        .iter()
        .enumerate()
        .map(|(i, event)| {
            events
                .iter()
                .enumerate()
                .filter(|(j, other)| *j != i && event.overlaps(other))
                .count()
        })
        .collect()
}

pub fn layout_day(events: &[&Event], mapper: &TimeSpaceMapper, config: LayoutConfig) -> DayLayout {
    let (all_day, timed): (Vec<&Event>, Vec<&Event>) = events.iter().copied().partition(|e| e.all_day);
    let counts = overlap_counts(&timed);

    let timed = timed
        .iter()
        .zip(counts)
        .map(|(event, overlap_count)| {
            let start_px = mapper.time_to_pixel(event.start);
            let end_px = mapper.time_to_pixel(event.end);
            EventLayout {
                event_id: event.id,
                top: start_px.max(0.0),
                height: (end_px - start_px).max(config.min_height_px),
                left_offset_px: overlap_count as f32 * config.stack_step_px,
                overlap_count,
            }
        })
        .collect();

    DayLayout {
        timed,
        all_day: all_day.iter().map(|e| e.id).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::mapper::GridGeometry;
    use chrono::{NaiveTime, TimeZone};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn at(hour: u32, minute: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 10, hour, minute, 0).unwrap()
    }

    fn event(id: EventId, start: (u32, u32), end: (u32, u32)) -> Event {
        Event::new(id, format!("Event {id}"), 1, at(start.0, start.1), at(end.0, end.1))
    }

    fn mapper() -> TimeSpaceMapper {
        TimeSpaceMapper::for_day(
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            GridGeometry {
                hour_height_px: 64.0,
                snap_interval_minutes: 15,
                visible_minutes: 16 * 60,
            },
        )
    }

    fn config() -> LayoutConfig {
        LayoutConfig {
            min_height_px: 32.0,
            stack_step_px: 20.0,
        }
    }

    #[test]
    fn test_overlapping_pair_and_isolated_event() {
        let events = vec![event(1, (9, 0), (10, 0)), event(2, (9, 30), (10, 30)), event(3, (11, 0), (12, 0))];
        let refs: Vec<&Event> = events.iter().collect();
        let layout = layout_day(&refs, &mapper(), config());

        assert!(layout.get(2).unwrap().left_offset_px > 0.0);
        assert_eq!(layout.get(3).unwrap().left_offset_px, 0.0);
    }

    #[test]
    fn test_geometry_of_one_hour_event() {
        let events = vec![event(1, (9, 0), (10, 0))];
        let refs: Vec<&Event> = events.iter().collect();
        let layout = layout_day(&refs, &mapper(), config());

        assert_eq!(
            layout.timed,
            vec![EventLayout {
                event_id: 1,
                top: 64.0,
                height: 64.0,
                left_offset_px: 0.0,
                overlap_count: 0,
            }]
        );
    }

    #[test]
    fn test_short_event_gets_height_floor() {
        let events = vec![event(1, (9, 0), (9, 10))];
        let refs: Vec<&Event> = events.iter().collect();
        let layout = layout_day(&refs, &mapper(), config());
        assert_eq!(layout.timed[0].height, 32.0);
    }

    #[test]
    fn test_event_before_day_start_clamps_top() {
        let events = vec![event(1, (7, 0), (9, 0))];
        let refs: Vec<&Event> = events.iter().collect();
        let layout = layout_day(&refs, &mapper(), config());
        assert_eq!(layout.timed[0].top, 0.0);
        assert_eq!(layout.timed[0].height, 128.0);
    }

    #[test]
    fn test_clamped_top_keeps_full_duration_height() {
        let events = vec![event(1, (6, 0), (9, 0))];
        let refs: Vec<&Event> = events.iter().collect();
        let layout = layout_day(&refs, &mapper(), config());
        assert_eq!(layout.timed[0].top, 0.0);
        assert_eq!(layout.timed[0].height, 192.0);
    }

    #[test]
    fn test_touching_events_are_not_stacked() {
        let events = vec![event(1, (9, 0), (10, 0)), event(2, (10, 0), (11, 0))];
        let refs: Vec<&Event> = events.iter().collect();
        assert_eq!(overlap_counts(&refs), vec![0, 0]);
    }

    #[test]
    fn test_equal_counts_share_offset() {
        // B and C both overlap A and each other: all three count 2
        let events = vec![event(1, (9, 0), (12, 0)), event(2, (9, 30), (10, 30)), event(3, (10, 0), (11, 0))];
        let refs: Vec<&Event> = events.iter().collect();
        let layout = layout_day(&refs, &mapper(), config());
        assert_eq!(layout.get(2).unwrap().left_offset_px, layout.get(3).unwrap().left_offset_px);
    }

    #[test]
    fn test_all_day_events_are_listed_separately() {
        let events = vec![event(1, (0, 0), (23, 59)).with_all_day(true), event(2, (9, 0), (10, 0))];
        let refs: Vec<&Event> = events.iter().collect();
        let layout = layout_day(&refs, &mapper(), config());
        assert_eq!(layout.all_day, vec![1]);
        assert_eq!(layout.timed.len(), 1);
        assert_eq!(layout.timed[0].overlap_count, 0);
    }

    #[test]
    fn test_events_for_day_includes_spanning_into_day() {
        let yesterday = Local.with_ymd_and_hms(2025, 3, 9, 22, 0, 0).unwrap();
        let events = vec![
            Event::new(1, "Overnight", 1, yesterday, at(1, 0)),
            Event::new(2, "Elsewhere", 1, yesterday, yesterday + chrono::Duration::hours(1)),
            event(3, (9, 0), (10, 0)),
        ];
        let ids: Vec<EventId> = events_for_day(&events, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap())
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_width_in_never_negative() {
        let layout = EventLayout {
            event_id: 1,
            top: 0.0,
            height: 32.0,
            left_offset_px: 120.0,
            overlap_count: 6,
        };
        assert_eq!(layout.width_in(300.0), 180.0);
        assert_eq!(layout.width_in(100.0), 0.0);
    }

    fn arb_events() -> impl Strategy<Value = Vec<Event>> {
        prop::collection::vec((0u32..(20 * 4), 1u32..16), 0..24).prop_map(|slots| {
            slots
                .into_iter()
                .enumerate()
                .map(|(i, (start_slot, len_slots))| {
                    let start = at(0, 0) + chrono::Duration::minutes(start_slot as i64 * 15);
                    let end = start + chrono::Duration::minutes(len_slots as i64 * 15);
                    Event::new(i as EventId, "p", 1, start, end)
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_sweep_matches_pairwise(events in arb_events()) {
            let refs: Vec<&Event> = events.iter().collect();
            prop_assert_eq!(overlap_counts(&refs), overlap_counts_pairwise(&refs));
        }

        #[test]
        fn prop_height_respects_floor_and_duration(events in arb_events()) {
            let refs: Vec<&Event> = events.iter().collect();
            let m = mapper();
            let layout = layout_day(&refs, &m, config());
            for (event, placed) in events.iter().zip(layout.timed.iter()) {
                let true_height = m.duration_to_pixels(event.duration());
                prop_assert!(placed.height >= config().min_height_px);
                prop_assert!(placed.height >= true_height);
            }
        }

        #[test]
        fn prop_different_counts_give_different_offsets(events in arb_events()) {
            let refs: Vec<&Event> = events.iter().collect();
            let layout = layout_day(&refs, &mapper(), config());
            for (i, a) in events.iter().enumerate() {
                for (j, b) in events.iter().enumerate() {
                    let (la, lb) = (&layout.timed[i], &layout.timed[j]);
                    if i != j && a.overlaps(b) && la.overlap_count != lb.overlap_count {
                        prop_assert_ne!(la.left_offset_px, lb.left_offset_px);
                    }
                }
            }
        }
    }
}
