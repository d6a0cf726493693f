// At most one contextual editor is open across every grid sharing a surface stack

mod fixtures;

use proptest::prelude::*;

use fixtures::dates::at;
use fixtures::{clock, day_grid, RecordingHost};
use schedule_grid::grid::{SurfaceKind, SurfaceStack};
use schedule_grid::models::event::Event;
use schedule_grid::models::ui::GridPoint;

#[test]
fn opening_an_editor_in_one_grid_closes_the_other() {
    let clock = clock();
    let surfaces = SurfaceStack::shared();
    let mut left = day_grid(clock.clone(), surfaces.clone(), &[]);
    let mut right = day_grid(clock.clone(), surfaces.clone(), &[]);
    let mut host = RecordingHost::new();

    left.pointer_down(GridPoint::new(10.0, 64.0));
    left.pointer_up(GridPoint::new(10.0, 128.0), 1, &mut host);
    assert!(left.editors().is_quick_create_open());

    right.pointer_down(GridPoint::new(10.0, 192.0));
    right.pointer_up(GridPoint::new(10.0, 256.0), 1, &mut host);
    assert!(right.editors().is_quick_create_open());

    left.tick();
    assert!(!left.editors().is_open());
    assert_eq!(surfaces.borrow().depth(), 1);
}

#[test]
fn detail_editor_is_evicted_by_quick_create_elsewhere() {
    let clock = clock();
    let surfaces = SurfaceStack::shared();
    let event = Event::new(3, "Review", 1, at(9, 0), at(10, 0));
    let mut left = day_grid(clock.clone(), surfaces.clone(), &[event]);
    let mut right = day_grid(clock.clone(), surfaces.clone(), &[]);
    let mut host = RecordingHost::new();

    left.pointer_down_on_event(3, GridPoint::new(10.0, 64.0));
    left.end_drag(0.0, 1, &mut host);
    assert!(left.editors().is_detail_open());

    right.pointer_down(GridPoint::new(10.0, 64.0));
    right.pointer_up(GridPoint::new(10.0, 64.0), 1, &mut host);
    clock.advance_ms(220);
    right.tick();
    left.tick();

    assert!(right.editors().is_quick_create_open());
    assert!(!left.editors().is_detail_open());
}

#[test]
fn modal_surface_suppresses_grid_input() {
    let clock = clock();
    let surfaces = SurfaceStack::shared();
    let event = Event::new(3, "Review", 1, at(9, 0), at(10, 0));
    let mut grid = day_grid(clock.clone(), surfaces.clone(), &[event]);
    let mut host = RecordingHost::new();

    let modal = surfaces.borrow_mut().push(SurfaceKind::Modal);

    grid.pointer_down(GridPoint::new(10.0, 64.0));
    assert_eq!(grid.pointer_up(GridPoint::new(10.0, 200.0), 1, &mut host), None);
    assert!(!grid.pointer_down_on_event(3, GridPoint::new(10.0, 64.0)));
    clock.advance_ms(500);
    assert_eq!(grid.tick(), None);
    assert!(!grid.editors().is_open());

    assert!(surfaces.borrow_mut().pop(modal));
    grid.pointer_down(GridPoint::new(10.0, 64.0));
    assert!(grid.pointer_up(GridPoint::new(10.0, 200.0), 1, &mut host).is_some());
    assert!(grid.editors().is_quick_create_open());
}

#[test]
fn dropping_a_grid_releases_its_editor() {
    let clock = clock();
    let surfaces = SurfaceStack::shared();
    {
        let mut grid = day_grid(clock.clone(), surfaces.clone(), &[]);
        let mut host = RecordingHost::new();
        grid.pointer_down(GridPoint::new(10.0, 64.0));
        grid.pointer_up(GridPoint::new(10.0, 128.0), 1, &mut host);
        assert!(surfaces.borrow().is_any_editor_open());
    }
    assert!(!surfaces.borrow().is_any_editor_open());
    assert_eq!(surfaces.borrow().depth(), 0);
}

#[derive(Debug, Clone)]
enum Step {
    Select { grid: usize, from: f32, to: f32 },
    ClickEvent { grid: usize },
    Close { grid: usize },
    Tick,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0..2usize, 0.0f32..800.0, 0.0f32..800.0).prop_map(|(grid, from, to)| Step::Select { grid, from, to }),
        (0..2usize).prop_map(|grid| Step::ClickEvent { grid }),
        (0..2usize).prop_map(|grid| Step::Close { grid }),
        Just(Step::Tick),
    ]
}

proptest! {
    #[test]
    fn never_two_editors_open(steps in prop::collection::vec(step(), 1..40)) {
        let clock = clock();
        let surfaces = SurfaceStack::shared();
        let event = Event::new(3, "Review", 1, at(9, 0), at(10, 0));
        let mut grids = [
            day_grid(clock.clone(), surfaces.clone(), &[event.clone()]),
            day_grid(clock.clone(), surfaces.clone(), &[event]),
        ];
        let mut host = RecordingHost::new();

        for step in steps {
            match step {
                Step::Select { grid, from, to } => {
                    grids[grid].pointer_down(GridPoint::new(10.0, from));
                    grids[grid].pointer_up(GridPoint::new(10.0, to), 1, &mut host);
                }
                Step::ClickEvent { grid } => {
                    grids[grid].pointer_down_on_event(3, GridPoint::new(10.0, 64.0));
                    grids[grid].end_drag(0.0, 1, &mut host);
                }
                Step::Close { grid } => grids[grid].close_editors(),
                Step::Tick => clock.advance_ms(300),
            }
            // second pass lets a grid notice an eviction made later in the first
            for _ in 0..2 {
                for grid in grids.iter_mut() {
                    grid.tick();
                }
            }

            let open = grids.iter().filter(|g| g.editors().is_open()).count();
            prop_assert!(open <= 1);
            prop_assert!(surfaces.borrow().depth() <= 1);
            prop_assert_eq!(open == 1, surfaces.borrow().is_any_editor_open());
        }
    }
}
