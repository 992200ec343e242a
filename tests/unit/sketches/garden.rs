use super::*;
use crate::{
    draw::canvas::Canvas,
    foundation::core::Size,
    render::cpu::CpuSurface,
    sketch::{runner::Runner, scheduler::ManualClock},
};

fn garden_runner() -> Runner<Garden, CpuSurface, ManualClock> {
    let canvas = Canvas::cpu(Size::new(400, 225)).unwrap();
    Runner::new(Garden::new(), canvas, ManualClock::new(), 30.0)
        .unwrap()
        .with_seed(11)
}

#[test]
fn setup_plants_flowers_inside_margins_and_builds_bitmap() {
    let mut r = garden_runner();
    r.start().unwrap();

    let flowers = r.sketch().flowers();
    assert_eq!(flowers.len(), INITIAL_FLOWERS);
    for f in flowers {
        assert!((50.0..350.0).contains(&f.x));
        assert!((50.0..175.0).contains(&f.y));
        assert!((25.0..50.0).contains(&f.size));
        assert!(PETAL_COUNTS.contains(&f.petals));
        assert!(FLOWER_PALETTE.contains(&f.color));
    }

    let bitmap = r.sketch().bitmap().unwrap();
    assert_eq!((bitmap.width(), bitmap.height()), (300, 300));
    assert!(bitmap.is_realized());
}

#[test]
fn click_plants_a_flower_at_the_pointer() {
    let mut r = garden_runner();
    r.start().unwrap();
    r.pointer_clicked(123.0, 45.0).unwrap();
    let last = r.sketch().flowers().last().unwrap();
    assert_eq!((last.x, last.y), (123.0, 45.0));
    assert_eq!(r.sketch().flowers().len(), INITIAL_FLOWERS + 1);
}

#[test]
fn frames_render_without_errors() {
    let mut r = garden_runner();
    assert_eq!(r.run_for(3).unwrap(), 3);
    r.pointer_moved(390.0, 10.0);
    assert_eq!(r.run_for(1).unwrap(), 1);

    let frame = r.snapshot().unwrap();
    // the black background survives in a corner no flower or bitmap reaches
    assert_eq!(frame.pixel(399, 224), Some([0, 0, 0, 255]));
}

#[test]
fn same_seed_plants_same_garden() {
    let mut a = garden_runner();
    let mut b = garden_runner();
    a.start().unwrap();
    b.start().unwrap();
    assert_eq!(a.sketch().flowers(), b.sketch().flowers());
}
