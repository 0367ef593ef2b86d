use robotai_site::page::{resolve_active, PageSurface, SectionBounds, SectionLabel, SectionTracker, StaticPage};
use robotai_site::TrackerConfig;

fn gapped_page() -> StaticPage {
    StaticPage::stacked(&[
        (SectionLabel::Home, 600.0),
        (SectionLabel::About, 600.0),
        (SectionLabel::Robot, 800.0),
        (SectionLabel::Drone, 800.0),
        (SectionLabel::Contact, 500.0),
    ])
    .with_gap_before(SectionLabel::Drone, 300.0)
}

#[test]
fn offsets_inside_an_interval_select_that_section() {
    let page = gapped_page();
    let anchor = TrackerConfig::default().anchor_offset;
    for b in page.bounds() {
        let mut y = b.top_offset;
        while y < b.top_offset + b.height {
            let label = resolve_active(y - anchor, anchor, &page.bounds(), SectionLabel::Contact);
            assert_eq!(label, b.label, "offset {} should be in {}", y, b.label);
            y += 37.0;
        }
    }
}

#[test]
fn gap_between_sections_keeps_previous() {
    let page = gapped_page();
    let robot = page.measure(SectionLabel::Robot).unwrap();
    let gap_y = robot.top_offset + robot.height + 150.0;
    let scroll = gap_y - TrackerConfig::default().anchor_offset;

    for previous in SectionLabel::ALL {
        let mut t = SectionTracker::default();
        let mut p = gapped_page();
        t.navigate_to(previous, &mut p);
        assert_eq!(t.evaluate(scroll, &page.bounds()), previous);
        assert_eq!(t.active(), previous);
    }
}

#[test]
fn navigate_then_evaluate_round_trips() {
    for label in SectionLabel::ALL {
        let mut page = gapped_page();
        let mut t = SectionTracker::default();
        assert!(t.navigate_to(label, &mut page));
        assert_eq!(t.active(), label);

        let top = page.measure(label).unwrap().top_offset;
        assert_eq!(page.scroll_y(), top);
        assert_eq!(t.evaluate(top, &page.bounds()), label);
        assert_eq!(t.on_scroll(&page), label);
    }
}

#[test]
fn non_monotonic_offsets_are_deterministic() {
    let page = StaticPage::default();
    let mut t = SectionTracker::default();
    let bounds = page.bounds();
    let robot_y = page.measure(SectionLabel::Robot).unwrap().top_offset + 200.0;

    assert_eq!(t.evaluate(robot_y, &bounds), SectionLabel::Robot);
    assert_eq!(t.active(), SectionLabel::Robot);

    assert_eq!(t.evaluate(100.0, &bounds), SectionLabel::Home);
    assert_eq!(t.active(), SectionLabel::Home);

    assert_eq!(t.evaluate(robot_y, &bounds), SectionLabel::Robot);
    assert_eq!(t.active(), SectionLabel::Robot);

    // elastic bounce inside one section, then repeated events at one offset
    for y in [robot_y + 40.0, robot_y - 30.0, robot_y + 10.0, robot_y, robot_y, robot_y] {
        assert_eq!(t.evaluate(y, &bounds), SectionLabel::Robot);
    }
}

#[test]
fn overscroll_keeps_last_section_active() {
    let page = StaticPage::default();
    let mut t = SectionTracker::default();
    let contact = page.measure(SectionLabel::Contact).unwrap();

    assert_eq!(t.evaluate(contact.top_offset, &page.bounds()), SectionLabel::Contact);
    // footer and elastic overscroll past the document end
    assert_eq!(t.evaluate(page.document_height() + 80.0, &page.bounds()), SectionLabel::Contact);
    // elastic overscroll above the top
    assert_eq!(t.evaluate(-200.0, &page.bounds()), SectionLabel::Contact);
    assert_eq!(t.evaluate(-20.0, &page.bounds()), SectionLabel::Home);
}

#[test]
fn boundary_belongs_to_the_section_starting_there() {
    let bounds = [
        SectionBounds::new(SectionLabel::Home, 0.0, 400.0),
        SectionBounds::new(SectionLabel::About, 400.0, 400.0),
    ];
    assert_eq!(resolve_active(300.0, 100.0, &bounds, SectionLabel::Home), SectionLabel::About);
    assert_eq!(resolve_active(299.5, 100.0, &bounds, SectionLabel::About), SectionLabel::Home);
}

#[test]
fn reflow_is_picked_up_on_next_scroll() {
    let mut page = StaticPage::default();
    let mut t = SectionTracker::default();
    let about = page.measure(SectionLabel::About).unwrap();
    page.set_scroll_y(about.top_offset + about.height - 50.0);
    assert_eq!(t.on_scroll(&page), SectionLabel::Robot);

    // About grows; the same scroll offset now sits inside it
    page.resize(SectionLabel::About, about.height + 500.0);
    assert_eq!(t.on_scroll(&page), SectionLabel::About);
}

#[test]
fn custom_anchor_offset() {
    let page = StaticPage::default();
    let mut t = SectionTracker::new(TrackerConfig { anchor_offset: 0.0 });
    let about = page.measure(SectionLabel::About).unwrap();
    assert_eq!(t.evaluate(about.top_offset - 50.0, &page.bounds()), SectionLabel::Home);
    assert_eq!(t.anchor_offset(), 0.0);
}
