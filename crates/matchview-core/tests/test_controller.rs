mod common;

use common::{FakeApi, FakeSource};
use matchview_core::api::ReconstructionApi;
use matchview_core::controller::{MatchViewController, Reply, Request, SelectionPhase, SummaryView};
use matchview_core::error::MatchViewError;
use matchview_core::geometry::{Point2, Size2};
use matchview_core::model::{MatchClass, MatchSummary, Panel};
use matchview_core::viewport::ZoomDirection;

const IMAGE: Size2 = Size2::new(100.0, 100.0);
const CANVAS: Size2 = Size2::new(200.0, 200.0);

/// Three images; 1 and 2 share two inlier matches.
fn pair_source() -> FakeSource {
    let mut source = FakeSource::with_images(3, IMAGE, 10);
    source.add_matches(1, 2, MatchClass::Inlier, &[(0, 3), (1, 4)]);
    source
}

fn started(api: &FakeApi) -> MatchViewController {
    let mut c = MatchViewController::default();
    c.layout_panel(Panel::A, Point2::ZERO, CANVAS);
    c.layout_panel(Panel::B, Point2::new(200.0, 0.0), CANVAS);
    c.start();
    c.run_until_idle(api);
    c
}

fn with_pair(api: &FakeApi, a: u32, b: u32) -> MatchViewController {
    let mut c = started(api);
    c.select_a(Some(a));
    c.run_until_idle(api);
    c.select_b(Some(b));
    c.run_until_idle(api);
    c
}

fn execute_all(c: &mut MatchViewController, api: &FakeApi, tickets: Vec<matchview_core::controller::Ticket>) {
    for ticket in tickets {
        let result = api.execute(&ticket.request);
        c.apply(Reply::new(ticket, result));
    }
}

// ---------------------------------------------------------------------------
// Startup and selection
// ---------------------------------------------------------------------------

#[test]
fn test_start_loads_sources_and_images() {
    let api = FakeApi::single(pair_source());
    let c = started(&api);
    assert_eq!(c.sources(), ["SfM Model".to_string()]);
    assert_eq!(c.active_source(), Some("SfM Model"));
    assert_eq!(c.images().len(), 3);
    assert_eq!(c.phase(), SelectionPhase::NoSelection);
    assert_eq!(c.summary(), &SummaryView::Prompt);
}

#[test]
fn test_select_a_loads_image_and_candidates() {
    let api = FakeApi::single(pair_source());
    let mut c = started(&api);
    c.select_a(Some(1));
    c.run_until_idle(&api);

    assert_eq!(c.phase(), SelectionPhase::ImageAOnly);
    assert_eq!(c.candidates(), [2]);
    assert_eq!(c.image(Panel::A).map(|i| i.id), Some(1));
    assert!(c.pixels(Panel::A).is_some());
    assert_eq!(c.summary(), &SummaryView::Prompt);
}

#[test]
fn test_inlier_pair_scenario() {
    let api = FakeApi::single(pair_source());
    let mut c = with_pair(&api, 1, 2);

    assert_eq!(c.phase(), SelectionPhase::FullPair);
    let SummaryView::Ready(summary) = c.summary() else {
        panic!("expected statistics, got {:?}", c.summary());
    };
    assert_eq!(summary.total_matches, Some(2));
    assert_eq!(summary.inlier_count, Some(2));
    assert_eq!(summary.outlier_count, Some(0));
    // Matches are not fetched until something displays them.
    assert_eq!(api.call_count("matches 1 2"), 0);

    c.set_show_lines(true).unwrap();
    c.run_until_idle(&api);

    assert_eq!(c.phase(), SelectionPhase::PairWithMatches);
    let derived = c.derived();
    assert_eq!(derived.matched_a.iter().copied().collect::<Vec<_>>(), vec![0, 1]);
    assert_eq!(derived.matched_b.iter().copied().collect::<Vec<_>>(), vec![3, 4]);
    assert_eq!(c.scene().lines.len(), 2);
}

#[test]
fn test_summary_unavailable_reason_is_shown() {
    let mut source = pair_source();
    source.summaries.insert(
        (1, 2),
        MatchSummary {
            available: false,
            reason: Some("No matches stored for this pair".to_string()),
            ..MatchSummary::default()
        },
    );
    let api = FakeApi::single(source);
    let c = with_pair(&api, 1, 2);
    assert_eq!(
        c.summary(),
        &SummaryView::Unavailable("No matches stored for this pair".to_string())
    );
}

#[test]
fn test_deselect_b_returns_to_single_image() {
    let api = FakeApi::single(pair_source());
    let mut c = with_pair(&api, 1, 2);
    c.set_show_lines(true).unwrap();
    c.run_until_idle(&api);

    c.select_b(None);
    assert_eq!(c.phase(), SelectionPhase::ImageAOnly);
    assert!(!c.flags().show_lines);
    assert!(c.matches().is_empty());
    assert_eq!(c.summary(), &SummaryView::Prompt);

    let scene = c.scene();
    assert!(scene.b.is_blank());
    assert!(!scene.a.is_blank());
    assert!(scene.lines.is_empty());
}

#[test]
fn test_deselect_a_clears_everything() {
    let api = FakeApi::single(pair_source());
    let mut c = with_pair(&api, 1, 2);
    c.select_a(None);

    assert_eq!(c.phase(), SelectionPhase::NoSelection);
    assert!(c.candidates().is_empty());
    let scene = c.scene();
    assert!(scene.a.is_blank());
    assert!(scene.b.is_blank());
}

#[test]
fn test_changing_a_revalidates_b() {
    let mut source = pair_source();
    source.add_matches(3, 1, MatchClass::Inlier, &[(0, 0)]);
    let api = FakeApi::single(source);
    let mut c = with_pair(&api, 1, 2);

    // Image 3 only matches image 1, so B = 2 is no longer a candidate.
    c.select_a(Some(3));
    c.run_until_idle(&api);
    assert_eq!(c.candidates(), [1]);
    assert_eq!(c.selected(Panel::B), None);
    assert_eq!(c.phase(), SelectionPhase::ImageAOnly);
}

#[test]
fn test_changing_a_keeps_valid_b() {
    let mut source = pair_source();
    source.add_matches(3, 2, MatchClass::Inlier, &[(5, 5)]);
    let api = FakeApi::single(source);
    let mut c = with_pair(&api, 1, 2);

    c.select_a(Some(3));
    c.run_until_idle(&api);
    assert_eq!(c.pair(), Some((3, 2)));
    assert!(matches!(c.summary(), SummaryView::Ready(_)));
}

#[test]
fn test_step_b_wraps_through_candidates() {
    let mut source = pair_source();
    source.add_matches(1, 3, MatchClass::Inlier, &[(2, 2)]);
    let api = FakeApi::single(source);
    let mut c = started(&api);
    c.select_a(Some(1));
    c.run_until_idle(&api);
    assert_eq!(c.candidates(), [2, 3]);

    let mut seen = Vec::new();
    for forward in [true, true, true, false] {
        assert!(c.step_b(forward));
        c.run_until_idle(&api);
        seen.push(c.selected(Panel::B).unwrap());
    }
    assert_eq!(seen, vec![2, 3, 2, 3]);
}

#[test]
fn test_step_b_without_candidates_is_noop() {
    let api = FakeApi::single(FakeSource::with_images(2, IMAGE, 4));
    let mut c = started(&api);
    c.select_a(Some(1));
    c.run_until_idle(&api);
    assert!(!c.step_b(true));
    assert_eq!(c.selected(Panel::B), None);
}

// ---------------------------------------------------------------------------
// Display toggles
// ---------------------------------------------------------------------------

#[test]
fn test_lines_need_a_pair() {
    let api = FakeApi::single(pair_source());
    let mut c = started(&api);
    c.select_a(Some(1));
    c.run_until_idle(&api);

    let err = c.set_show_lines(true).unwrap_err();
    assert!(matches!(err, MatchViewError::MissingPair));
    assert!(!c.flags().show_lines);
    assert!(!c.has_queued_requests());
}

#[test]
fn test_class_filter_refetches_with_one_request_per_class() {
    let mut source = pair_source();
    source.add_matches(1, 2, MatchClass::Outlier, &[(2, 5)]);
    let api = FakeApi::single(source);
    let mut c = with_pair(&api, 1, 2);
    c.set_show_lines(true).unwrap();
    c.run_until_idle(&api);
    assert_eq!(c.matches().len(), 2);
    assert_eq!(api.call_count("matches 1 2 outlier"), 0);

    c.set_class_filter(MatchClass::Outlier, true);
    c.run_until_idle(&api);
    assert_eq!(api.call_count("matches 1 2 inlier"), 2);
    assert_eq!(api.call_count("matches 1 2 outlier"), 1);
    assert_eq!(c.matches().len(), 3);

    let lines = c.scene().lines;
    assert_eq!(lines.len(), 3);
    assert_eq!(lines.last().unwrap().class, MatchClass::Outlier);

    c.set_class_filter(MatchClass::Inlier, false);
    c.run_until_idle(&api);
    assert_eq!(c.matches().len(), 1);
}

#[test]
fn test_only_matched_fetches_matches_without_lines() {
    let api = FakeApi::single(pair_source());
    let mut c = with_pair(&api, 1, 2);
    c.set_only_matched(true);
    c.run_until_idle(&api);

    let scene = c.scene();
    assert!(scene.lines.is_empty());
    let a: Vec<usize> = scene.a.markers.iter().map(|m| m.index).collect();
    let b: Vec<usize> = scene.b.markers.iter().map(|m| m.index).collect();
    assert_eq!(a, vec![0, 1]);
    assert_eq!(b, vec![3, 4]);
}

#[test]
fn test_marker_size_adjustments() {
    let mut c = MatchViewController::default();
    let base = c.flags().marker_size;
    c.adjust_marker_size(true);
    assert!(c.flags().marker_size > base);
    c.set_marker_size(-1.0);
    c.set_marker_size(f64::NAN);
    assert!(c.flags().marker_size > base);
    c.set_marker_size(7.5);
    assert_eq!(c.flags().marker_size, 7.5);
}

// ---------------------------------------------------------------------------
// Asynchronous replies
// ---------------------------------------------------------------------------

#[test]
fn test_stale_replies_are_discarded() {
    let mut source = pair_source();
    source.add_matches(2, 3, MatchClass::Inlier, &[(1, 1)]);
    let api = FakeApi::single(source);
    let mut c = started(&api);

    c.select_a(Some(1));
    let old = c.take_requests();
    c.select_a(Some(2));
    let new = c.take_requests();

    // Newer replies arrive first, then the superseded ones.
    execute_all(&mut c, &api, new);
    for ticket in &old {
        assert!(!c.is_current(ticket));
    }
    for ticket in old {
        let result = api.execute(&ticket.request);
        assert!(c.apply(Reply::new(ticket, result)).is_none());
    }
    c.run_until_idle(&api);

    assert_eq!(c.image(Panel::A).map(|i| i.id), Some(2));
    assert_eq!(c.candidates(), [1, 3]);
}

#[test]
fn test_matches_share_one_token() {
    let api = FakeApi::single(pair_source());
    let mut c = with_pair(&api, 1, 2);
    c.set_class_filter(MatchClass::Outlier, true);
    c.set_show_lines(true).unwrap();

    let tickets = c.take_requests();
    let matches: Vec<_> = tickets
        .iter()
        .filter(|t| matches!(t.request, Request::Matches { .. }))
        .collect();
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].token, matches[1].token);
    assert!(matches.iter().all(|t| c.is_current(t)));
}

#[test]
fn test_match_failure_marks_statistics_unavailable() {
    let api = FakeApi::single(pair_source());
    api.fail_matches.set(true);
    let mut c = with_pair(&api, 1, 2);
    assert!(matches!(c.summary(), SummaryView::Ready(_)));

    c.set_show_lines(true).unwrap();
    c.run_until_idle(&api);
    assert_eq!(c.summary(), &SummaryView::unavailable());
    assert!(c.matches().is_empty());
    assert!(c.scene().lines.is_empty());
    // Both panels still render.
    assert!(!c.scene().a.is_blank());
    assert!(!c.scene().b.is_blank());
}

#[test]
fn test_summary_failure_keeps_matches() {
    let api = FakeApi::single(pair_source());
    api.fail_summary.set(true);
    let mut c = started(&api);
    c.select_a(Some(1));
    c.run_until_idle(&api);
    c.select_b(Some(2));
    c.set_show_lines(true).unwrap();
    c.run_until_idle(&api);

    assert_eq!(c.summary(), &SummaryView::unavailable());
    assert!(c.flags().show_lines);
    assert_eq!(c.matches().len(), 2);
    assert_eq!(c.scene().lines.len(), 2);
    assert_eq!(c.phase(), SelectionPhase::PairWithMatches);
}

#[test]
fn test_summary_failure_does_not_discard_in_flight_matches() {
    let api = FakeApi::single(pair_source());
    let mut c = with_pair(&api, 1, 2);
    c.select_b(Some(2));
    c.set_show_lines(true).unwrap();
    let tickets = c.take_requests();

    api.fail_summary.set(true);
    // Summary reply lands first, matches afterwards.
    let (summary, rest): (Vec<_>, Vec<_>) = tickets
        .into_iter()
        .partition(|t| matches!(t.request, Request::Summary { .. }));
    execute_all(&mut c, &api, summary);
    execute_all(&mut c, &api, rest);
    c.run_until_idle(&api);

    assert_eq!(c.summary(), &SummaryView::unavailable());
    assert_eq!(c.scene().lines.len(), 2);
}

#[test]
fn test_panel_renders_blank_until_pixels_arrive() {
    let api = FakeApi::single(pair_source());
    let mut c = started(&api);
    c.select_a(Some(1));

    let tickets = c.take_requests();
    execute_all(&mut c, &api, tickets);
    assert!(c.image(Panel::A).is_some());
    assert!(c.pixels(Panel::A).is_none());
    assert!(c.scene().a.is_blank());

    c.run_until_idle(&api);
    let scene = c.scene();
    assert!(scene.a.image.is_some());
    assert_eq!(scene.a.markers.len(), 10);
}

#[test]
fn test_pixels_fit_viewport_to_canvas() {
    let api = FakeApi::single(pair_source());
    let c = with_pair(&api, 1, 2);
    let vt = c.viewport(Panel::A);
    assert_eq!(vt.scale(), 2.0);
    assert_eq!(vt.translate(), Point2::ZERO);
    assert_eq!(c.pixels(Panel::A).unwrap().image.size(), IMAGE);
}

#[test]
fn test_resize_refits_viewport() {
    let api = FakeApi::single(pair_source());
    let mut c = with_pair(&api, 1, 2);
    c.viewport_mut(Panel::A)
        .zoom_at(Point2::new(10.0, 10.0), ZoomDirection::In);

    let redraw = c.layout_panel(Panel::A, Point2::ZERO, Size2::new(300.0, 100.0));
    assert!(redraw.a);
    let vt = c.viewport(Panel::A);
    assert_eq!(vt.scale(), 1.0);
    assert_eq!(vt.translate(), Point2::new(100.0, 0.0));
}

// ---------------------------------------------------------------------------
// Data sources
// ---------------------------------------------------------------------------

fn two_sources(second: FakeSource) -> FakeApi {
    FakeApi::multi(vec![
        ("reconstruction_0".to_string(), pair_source()),
        ("reconstruction_1".to_string(), second),
    ])
}

#[test]
fn test_unknown_source_rejected() {
    let api = FakeApi::single(pair_source());
    let mut c = started(&api);
    let err = c.select_source("missing").unwrap_err();
    assert!(matches!(err, MatchViewError::UnknownSource(name) if name == "missing"));
}

#[test]
fn test_source_switch_keeps_existing_selection() {
    let api = two_sources(pair_source());
    let mut c = with_pair(&api, 1, 2);
    c.viewport_mut(Panel::A)
        .zoom_at(Point2::new(50.0, 50.0), ZoomDirection::In);
    let zoomed = c.viewport(Panel::A).clone();

    c.select_source("reconstruction_1").unwrap();
    c.run_until_idle(&api);

    assert_eq!(c.active_source(), Some("reconstruction_1"));
    assert_eq!(c.pair(), Some((1, 2)));
    assert_eq!(api.call_count("image_data 1"), 2);
    assert_eq!(api.call_count("image_data 2"), 2);
    assert!(matches!(c.summary(), SummaryView::Ready(_)));
    // Same image at the same size keeps the user's zoom.
    assert_eq!(c.viewport(Panel::A), &zoomed);
}

#[test]
fn test_source_switch_drops_missing_b() {
    let api = two_sources(FakeSource::with_images(1, IMAGE, 10));
    let mut c = with_pair(&api, 1, 2);

    c.select_source("reconstruction_1").unwrap();
    c.run_until_idle(&api);

    assert_eq!(c.selected(Panel::A), Some(1));
    assert_eq!(c.selected(Panel::B), None);
    assert!(c.scene().b.is_blank());
}

#[test]
fn test_source_switch_clears_missing_a() {
    let mut second = FakeSource::with_images(3, IMAGE, 10);
    second.images.remove(0);
    let api = two_sources(second);
    let mut c = with_pair(&api, 1, 2);

    c.select_source("reconstruction_1").unwrap();
    c.run_until_idle(&api);

    assert_eq!(c.phase(), SelectionPhase::NoSelection);
    assert_eq!(c.images().len(), 2);
}

#[test]
fn test_source_switch_discards_in_flight_replies() {
    let api = two_sources(pair_source());
    let mut c = with_pair(&api, 1, 2);
    c.set_show_lines(true).unwrap();
    let in_flight = c.take_requests();

    c.select_source("reconstruction_1").unwrap();
    for ticket in &in_flight {
        assert!(!c.is_current(ticket));
    }
    execute_all(&mut c, &api, in_flight);
    assert!(c.matches().is_empty());
}

#[test]
fn test_image_list_failure_keeps_state() {
    let api = FakeApi::single(pair_source());
    let mut c = with_pair(&api, 1, 2);
    c.set_show_lines(true).unwrap();
    c.run_until_idle(&api);

    api.fail_images.set(true);
    c.refresh_images();
    c.run_until_idle(&api);

    assert_eq!(c.images().len(), 3);
    assert_eq!(c.pair(), Some((1, 2)));
    assert_eq!(c.candidates(), [2]);
    let scene = c.scene();
    assert!(!scene.a.is_blank());
    assert!(!scene.b.is_blank());
    assert_eq!(scene.lines.len(), 2);
}

#[test]
fn test_failed_source_switch_keeps_selection() {
    let api = two_sources(pair_source());
    let mut c = with_pair(&api, 1, 2);
    c.set_show_lines(true).unwrap();
    c.run_until_idle(&api);

    api.fail_set_source.set(true);
    c.select_source("reconstruction_1").unwrap();
    c.run_until_idle(&api);

    assert_eq!(c.active_source(), Some("reconstruction_0"));
    assert_eq!(c.pair(), Some((1, 2)));
    assert_eq!(c.candidates(), [2]);
    assert!(c.pixels(Panel::A).is_some());
    assert!(c.pixels(Panel::B).is_some());
    assert!(matches!(c.summary(), SummaryView::Ready(_)));
    let scene = c.scene();
    assert!(!scene.a.is_blank());
    assert!(!scene.b.is_blank());
    assert_eq!(scene.lines.len(), 2);
}

#[test]
fn test_source_switch_with_failed_image_list_reloads_selection() {
    let api = two_sources(pair_source());
    let mut c = with_pair(&api, 1, 2);

    c.select_source("reconstruction_1").unwrap();
    api.fail_images.set(true);
    c.run_until_idle(&api);

    assert_eq!(c.active_source(), Some("reconstruction_1"));
    // The previous list stays; the selection is fetched from the new source.
    assert_eq!(c.images().len(), 3);
    assert_eq!(c.pair(), Some((1, 2)));
    assert_eq!(api.call_count("image_data 1"), 2);
    assert!(matches!(c.summary(), SummaryView::Ready(_)));
    assert!(!c.scene().b.is_blank());
}
