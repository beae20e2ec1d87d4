//! Selection and match state machine.
//!
//! The controller never performs I/O. Every operation that needs backend data
//! queues a [`Ticket`]; the host executes tickets however it likes (worker
//! thread, inline) and feeds the outcome back through [`MatchViewController::apply`].
//! Each request channel remembers the token of its latest ticket, and replies
//! carrying any other token are dropped, so overlapping fetches resolve to the
//! most recent selection regardless of arrival order.

mod request;
mod summary;

pub use request::{Channel, Payload, Reply, Request, RequestToken, Ticket};
pub use summary::SummaryView;

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::api::ReconstructionApi;
use crate::config::ViewerConfig;
use crate::consts::{MARKER_GROW_FACTOR, MARKER_SHRINK_FACTOR};
use crate::error::{MatchViewError, Result};
use crate::geometry::{Point2, Size2};
use crate::interaction::Redraw;
use crate::matches::{DerivedMatchIndices, MatchSet};
use crate::model::{ImageData, ImageEntry, ImageId, Match, MatchClass, MatchClassFilter, Panel};
use crate::pixels::DecodedImage;
use crate::render::{render_overlay, render_panel, DisplayFlags, PanelView, Scene};
use crate::viewport::{ViewportTransform, ZoomLimits};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionPhase {
    NoSelection,
    ImageAOnly,
    FullPair,
    PairWithMatches,
}

/// Decoded pixels of a panel, tagged with the request that produced them.
/// Hosts can key texture caches on `revision`.
#[derive(Clone, Debug)]
pub struct PanelPixels {
    pub revision: RequestToken,
    pub image: Arc<DecodedImage>,
}

#[derive(Clone, Debug, Default)]
struct PanelSlot {
    selected: Option<ImageId>,
    image: Option<ImageData>,
    pixels: Option<PanelPixels>,
    viewport: ViewportTransform,
    canvas: Size2,
    origin: Point2,
    /// Image and pixel size the viewport was last fitted to.
    fitted_for: Option<(ImageId, Size2)>,
}

impl PanelSlot {
    fn with_limits(limits: Option<ZoomLimits>) -> Self {
        Self {
            viewport: ViewportTransform::default().with_limits(limits),
            ..Self::default()
        }
    }

    fn clear(&mut self) {
        self.selected = None;
        self.image = None;
        self.pixels = None;
        self.fitted_for = None;
    }

    fn pixel_size(&self) -> Option<Size2> {
        self.pixels.as_ref().map(|p| p.image.size())
    }

    fn view(&self) -> PanelView<'_> {
        PanelView {
            image: self.image.as_ref(),
            pixel_size: self.pixel_size(),
            viewport: &self.viewport,
            canvas: self.canvas,
            origin: self.origin,
        }
    }

    /// Fit the viewport to the canvas. Without `force`, only when the image
    /// differs from the one last fitted.
    fn refit(&mut self, force: bool) -> bool {
        let (Some(image), Some(size)) = (self.image.as_ref(), self.pixel_size()) else {
            return false;
        };
        if !self.canvas.is_valid() {
            return false;
        }
        let key = (image.id, size);
        if !force && self.fitted_for == Some(key) {
            return false;
        }
        match self.viewport.fit_to_canvas(size, self.canvas) {
            Ok(()) => {
                self.fitted_for = Some(key);
                true
            }
            Err(e) => {
                warn!("Viewport fit failed: {e}");
                false
            }
        }
    }
}

pub struct MatchViewController {
    next_token: u64,
    latest: HashMap<Channel, RequestToken>,
    outbox: Vec<Ticket>,

    sources: Vec<String>,
    active_source: Option<String>,
    images: Vec<ImageEntry>,
    candidates: Vec<ImageId>,
    panels: [PanelSlot; 2],

    filter: MatchClassFilter,
    flags: DisplayFlags,
    matches: MatchSet,
    matches_requested: bool,
    derived: DerivedMatchIndices,
    summary: SummaryView,

    /// Selection to re-establish once a source switch has delivered its image list.
    restore: Option<(Option<ImageId>, Option<ImageId>)>,
}

impl Default for MatchViewController {
    fn default() -> Self {
        Self::new(&ViewerConfig::default())
    }
}

impl MatchViewController {
    pub fn new(config: &ViewerConfig) -> Self {
        let limits = config.zoom_limits;
        Self {
            next_token: 0,
            latest: HashMap::new(),
            outbox: Vec::new(),
            sources: Vec::new(),
            active_source: None,
            images: Vec::new(),
            candidates: Vec::new(),
            panels: [PanelSlot::with_limits(limits), PanelSlot::with_limits(limits)],
            filter: config.display.class_filter(),
            flags: config.display.flags(),
            matches: MatchSet::default(),
            matches_requested: false,
            derived: DerivedMatchIndices::default(),
            summary: SummaryView::Prompt,
            restore: None,
        }
    }

    // ------------------------------------------------------------------
    // Request bookkeeping
    // ------------------------------------------------------------------

    fn issue(&mut self, channel: Channel) -> RequestToken {
        self.next_token += 1;
        let token = RequestToken(self.next_token);
        self.latest.insert(channel, token);
        token
    }

    fn send(&mut self, token: RequestToken, request: Request) {
        debug!(%token, %request, "queue request");
        self.outbox.push(Ticket { token, request });
    }

    fn request(&mut self, request: Request) -> RequestToken {
        let token = self.issue(request.channel());
        self.send(token, request);
        token
    }

    /// Make every in-flight reply on `channel` stale.
    fn invalidate(&mut self, channel: Channel) {
        self.issue(channel);
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.latest.get(&ticket.request.channel()) == Some(&ticket.token)
    }

    /// Drain the queued requests for the host to execute.
    pub fn take_requests(&mut self) -> Vec<Ticket> {
        std::mem::take(&mut self.outbox)
    }

    pub fn has_queued_requests(&self) -> bool {
        !self.outbox.is_empty()
    }

    /// Execute queued requests inline until none remain. Returns the number of
    /// replies applied.
    pub fn run_until_idle(&mut self, api: &dyn ReconstructionApi) -> usize {
        let mut applied = 0;
        loop {
            let tickets = self.take_requests();
            if tickets.is_empty() {
                return applied;
            }
            for ticket in tickets {
                let result = api.execute(&ticket.request);
                self.apply(Reply::new(ticket, result));
                applied += 1;
            }
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    fn slot(&self, panel: Panel) -> &PanelSlot {
        match panel {
            Panel::A => &self.panels[0],
            Panel::B => &self.panels[1],
        }
    }

    fn slot_mut(&mut self, panel: Panel) -> &mut PanelSlot {
        match panel {
            Panel::A => &mut self.panels[0],
            Panel::B => &mut self.panels[1],
        }
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn active_source(&self) -> Option<&str> {
        self.active_source.as_deref()
    }

    pub fn images(&self) -> &[ImageEntry] {
        &self.images
    }

    pub fn image_entry(&self, id: ImageId) -> Option<&ImageEntry> {
        self.images.iter().find(|e| e.id == id)
    }

    /// Candidate images for panel B: those with matches against image A.
    pub fn candidates(&self) -> &[ImageId] {
        &self.candidates
    }

    pub fn selected(&self, panel: Panel) -> Option<ImageId> {
        self.slot(panel).selected
    }

    pub fn pair(&self) -> Option<(ImageId, ImageId)> {
        Some((self.selected(Panel::A)?, self.selected(Panel::B)?))
    }

    pub fn image(&self, panel: Panel) -> Option<&ImageData> {
        self.slot(panel).image.as_ref()
    }

    pub fn pixels(&self, panel: Panel) -> Option<&PanelPixels> {
        self.slot(panel).pixels.as_ref()
    }

    pub fn viewport(&self, panel: Panel) -> &ViewportTransform {
        &self.slot(panel).viewport
    }

    pub fn viewport_mut(&mut self, panel: Panel) -> &mut ViewportTransform {
        &mut self.slot_mut(panel).viewport
    }

    pub fn canvas(&self, panel: Panel) -> Size2 {
        self.slot(panel).canvas
    }

    pub fn flags(&self) -> &DisplayFlags {
        &self.flags
    }

    pub fn class_filter(&self) -> MatchClassFilter {
        self.filter
    }

    pub fn matches(&self) -> &MatchSet {
        &self.matches
    }

    pub fn derived(&self) -> &DerivedMatchIndices {
        &self.derived
    }

    pub fn summary(&self) -> &SummaryView {
        &self.summary
    }

    pub fn phase(&self) -> SelectionPhase {
        match (self.selected(Panel::A), self.selected(Panel::B)) {
            (None, _) => SelectionPhase::NoSelection,
            (Some(_), None) => SelectionPhase::ImageAOnly,
            (Some(_), Some(_)) if self.matches.any_loaded() => SelectionPhase::PairWithMatches,
            (Some(_), Some(_)) => SelectionPhase::FullPair,
        }
    }

    /// Immutable render of both panels and the overlay from current state.
    pub fn scene(&self) -> Scene {
        let view_a = self.slot(Panel::A).view();
        let view_b = self.slot(Panel::B).view();
        Scene {
            a: render_panel(Panel::A, &view_a, &self.flags, &self.derived),
            b: render_panel(Panel::B, &view_b, &self.flags, &self.derived),
            origins: [view_a.origin, view_b.origin],
            lines: render_overlay(&view_a, &view_b, &self.matches, &self.flags),
        }
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Request the source list and the image list of the active source.
    pub fn start(&mut self) {
        self.request(Request::Sources);
        self.request(Request::Images);
    }

    /// Re-fetch the image list of the active source.
    pub fn refresh_images(&mut self) {
        self.request(Request::Images);
    }

    /// Switch the backend's active data source. The current selection is kept
    /// when its images still exist in the new source.
    pub fn select_source(&mut self, name: &str) -> Result<()> {
        if !self.sources.iter().any(|s| s == name) {
            return Err(MatchViewError::UnknownSource(name.to_string()));
        }
        if self.active_source.as_deref() == Some(name) {
            return Ok(());
        }
        info!(source = name, "switching data source");
        self.restore = Some((self.selected(Panel::A), self.selected(Panel::B)));
        for channel in [
            Channel::Panel(Panel::A),
            Channel::Panel(Panel::B),
            Channel::Candidates,
            Channel::Matches,
            Channel::Summary,
        ] {
            self.invalidate(channel);
        }
        self.request(Request::SetSource {
            name: name.to_string(),
        });
        Ok(())
    }

    pub fn select_a(&mut self, id: Option<ImageId>) {
        self.reset_matches();
        self.summary = SummaryView::Prompt;
        self.candidates.clear();
        match id {
            None => {
                info!("image A cleared");
                self.invalidate(Channel::Candidates);
                self.clear_panel(Panel::A);
                self.clear_panel(Panel::B);
                self.flags.show_lines = false;
            }
            Some(id) => {
                info!(image = id, "image A selected");
                self.load_panel(Panel::A, id);
                self.request(Request::Candidates { image: id });
            }
        }
    }

    pub fn select_b(&mut self, id: Option<ImageId>) {
        self.reset_matches();
        match id {
            None => {
                info!("image B cleared");
                self.clear_panel(Panel::B);
                self.flags.show_lines = false;
                self.summary = SummaryView::Prompt;
            }
            Some(id) => {
                info!(image = id, "image B selected");
                self.load_panel(Panel::B, id);
                self.refresh_pair();
            }
        }
    }

    /// Move the panel B selection through the candidate list, wrapping around.
    /// Returns false when there is nothing to step through.
    pub fn step_b(&mut self, forward: bool) -> bool {
        let n = self.candidates.len();
        if n == 0 {
            return false;
        }
        let current = self
            .selected(Panel::B)
            .and_then(|b| self.candidates.iter().position(|&c| c == b));
        let next = match (current, forward) {
            (Some(i), true) => (i + 1) % n,
            (Some(i), false) => (i + n - 1) % n,
            (None, true) => 0,
            (None, false) => n - 1,
        };
        let id = self.candidates[next];
        self.select_b(Some(id));
        true
    }

    fn clear_panel(&mut self, panel: Panel) {
        self.invalidate(Channel::Panel(panel));
        self.slot_mut(panel).clear();
    }

    fn load_panel(&mut self, panel: Panel, id: ImageId) {
        let slot = self.slot_mut(panel);
        // A different image blanks the panel until it loads; the same image
        // (e.g. after a source switch) stays visible while it is re-fetched.
        if slot.image.as_ref().map(|i| i.id) != Some(id) {
            slot.image = None;
            slot.pixels = None;
        }
        slot.selected = Some(id);
        self.request(Request::ImageData { panel, id });
    }

    fn reset_matches(&mut self) {
        self.matches.clear();
        self.matches_requested = false;
        self.derived = DerivedMatchIndices::default();
        self.invalidate(Channel::Matches);
        self.invalidate(Channel::Summary);
    }

    /// Summary always; match lists only when something displays them.
    fn refresh_pair(&mut self) {
        let Some((a, b)) = self.pair() else {
            self.summary = SummaryView::Prompt;
            return;
        };
        self.summary = SummaryView::Loading;
        self.request(Request::Summary { a, b });
        if self.flags.show_lines || self.flags.only_matched {
            self.fetch_matches(a, b);
        }
    }

    /// One request per active class, all sharing one token.
    fn fetch_matches(&mut self, a: ImageId, b: ImageId) {
        self.matches.clear();
        self.derived = DerivedMatchIndices::default();
        self.matches_requested = true;
        let token = self.issue(Channel::Matches);
        for class in self.filter.active() {
            self.send(token, Request::Matches { a, b, class });
        }
    }

    // ------------------------------------------------------------------
    // Filters and display toggles
    // ------------------------------------------------------------------

    pub fn set_class_filter(&mut self, class: MatchClass, enabled: bool) {
        if self.filter.contains(class) == enabled {
            return;
        }
        self.filter.set(class, enabled);
        debug!(%class, enabled, "match class filter changed");
        if let Some((a, b)) = self.pair() {
            if self.flags.show_lines || self.flags.only_matched {
                self.fetch_matches(a, b);
            }
            if matches!(self.summary, SummaryView::Unavailable(_)) {
                self.summary = SummaryView::Loading;
                self.request(Request::Summary { a, b });
            }
        }
    }

    /// Turning lines on needs a selected pair; otherwise the toggle stays off.
    pub fn set_show_lines(&mut self, enabled: bool) -> Result<()> {
        if !enabled {
            self.flags.show_lines = false;
            return Ok(());
        }
        let Some((a, b)) = self.pair() else {
            self.flags.show_lines = false;
            return Err(MatchViewError::MissingPair);
        };
        self.flags.show_lines = true;
        if !self.matches_requested {
            self.fetch_matches(a, b);
        }
        Ok(())
    }

    pub fn set_only_matched(&mut self, enabled: bool) {
        self.flags.only_matched = enabled;
        if enabled && !self.matches_requested {
            if let Some((a, b)) = self.pair() {
                self.fetch_matches(a, b);
            }
        }
    }

    pub fn set_show_markers(&mut self, enabled: bool) {
        self.flags.show_markers = enabled;
    }

    /// Ignored unless `size` is finite and positive.
    pub fn set_marker_size(&mut self, size: f64) {
        if size.is_finite() && size > 0.0 {
            self.flags.marker_size = size;
        }
    }

    pub fn adjust_marker_size(&mut self, grow: bool) {
        let factor = if grow {
            MARKER_GROW_FACTOR
        } else {
            MARKER_SHRINK_FACTOR
        };
        self.set_marker_size(self.flags.marker_size * factor);
    }

    // ------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------

    /// Place a panel canvas in overlay space. A size change refits the viewport.
    pub fn layout_panel(&mut self, panel: Panel, origin: Point2, size: Size2) -> Redraw {
        let slot = self.slot_mut(panel);
        let moved = slot.origin != origin;
        let resized = slot.canvas != size;
        slot.origin = origin;
        if resized {
            slot.canvas = size;
            slot.refit(true);
        }
        if moved || resized {
            Redraw::panel(panel)
        } else {
            Redraw::NONE
        }
    }

    /// Explicitly refit a panel's viewport to its canvas.
    pub fn reset_view(&mut self, panel: Panel) -> Redraw {
        if self.slot_mut(panel).refit(true) {
            Redraw::panel(panel)
        } else {
            Redraw::NONE
        }
    }

    // ------------------------------------------------------------------
    // Replies
    // ------------------------------------------------------------------

    /// Apply a finished request. Stale replies are dropped.
    pub fn apply(&mut self, reply: Reply) -> Redraw {
        let Reply { ticket, result } = reply;
        if !self.is_current(&ticket) {
            debug!(token = %ticket.token, request = %ticket.request, "discarding stale reply");
            return Redraw::NONE;
        }
        let token = ticket.token;
        let payload = match result {
            Ok(payload) => payload,
            Err(e) => return self.apply_failure(ticket.request, e),
        };

        match (ticket.request, payload) {
            (Request::Sources, Payload::Sources(list)) => self.on_sources(list),
            (Request::SetSource { name }, Payload::SourceSet) => self.on_source_set(name),
            (Request::Images, Payload::Images(list)) => self.on_images(list),
            (Request::ImageData { panel, .. }, Payload::ImageData(data)) => {
                self.on_image_data(panel, data)
            }
            (Request::ImagePixels { panel, .. }, Payload::Pixels(decoded)) => {
                self.on_pixels(panel, token, decoded)
            }
            (Request::Candidates { .. }, Payload::Candidates(list)) => self.on_candidates(list),
            (Request::Matches { class, .. }, Payload::Matches(list)) => self.on_matches(class, list),
            (Request::Summary { .. }, Payload::Summary(summary)) => {
                self.summary = SummaryView::from_summary(summary);
                Redraw::NONE
            }
            (request, _) => {
                warn!(%request, "reply payload does not match its request");
                Redraw::NONE
            }
        }
    }

    fn apply_failure(&mut self, request: Request, err: MatchViewError) -> Redraw {
        warn!(%request, "request failed: {err}");
        match request {
            Request::Sources => Redraw::NONE,
            Request::Images | Request::SetSource { .. } => {
                // A switch in progress already made the panel requests stale.
                if self.restore.take().is_some() {
                    self.reload_selection()
                } else {
                    Redraw::NONE
                }
            }
            Request::ImageData { panel, .. } | Request::ImagePixels { panel, .. } => {
                let slot = self.slot_mut(panel);
                slot.image = None;
                slot.pixels = None;
                slot.fitted_for = None;
                Redraw::panel(panel)
            }
            Request::Candidates { .. } => {
                self.candidates.clear();
                if self.selected(Panel::B).is_some() {
                    self.select_b(None);
                }
                Redraw::ALL
            }
            Request::Matches { .. } => {
                self.reset_matches();
                self.summary = SummaryView::unavailable();
                Redraw::ALL
            }
            Request::Summary { .. } => {
                self.summary = SummaryView::unavailable();
                Redraw::NONE
            }
        }
    }

    /// Fetch the current selection again after a source switch did not complete.
    fn reload_selection(&mut self) -> Redraw {
        match self.selected(Panel::A) {
            Some(a) => {
                info!(image = a, "reloading selection");
                self.select_a(Some(a));
                Redraw::ALL
            }
            None => Redraw::NONE,
        }
    }

    fn on_sources(&mut self, list: Vec<String>) -> Redraw {
        let keep = self
            .active_source
            .as_ref()
            .is_some_and(|s| list.contains(s));
        if !keep {
            self.active_source = list.first().cloned();
        }
        self.sources = list;
        Redraw::NONE
    }

    fn on_source_set(&mut self, name: String) -> Redraw {
        info!(source = %name, "data source active");
        self.active_source = Some(name);
        self.request(Request::Images);
        Redraw::NONE
    }

    fn on_images(&mut self, list: Vec<ImageEntry>) -> Redraw {
        self.images = list;
        let Some((a, b)) = self.restore.take() else {
            return Redraw::NONE;
        };

        let known = |id: Option<ImageId>, images: &[ImageEntry]| {
            id.filter(|id| images.iter().any(|e| e.id == *id))
        };
        match known(a, &self.images) {
            Some(a) => {
                if known(b, &self.images).is_none() {
                    self.clear_panel(Panel::B);
                }
                // Panel B is re-validated against the new candidate list.
                self.select_a(Some(a));
            }
            None => {
                info!("selection not present in new source, clearing");
                self.select_a(None);
            }
        }
        Redraw::ALL
    }

    fn on_image_data(&mut self, panel: Panel, data: ImageData) -> Redraw {
        debug!(%panel, image = data.id, points = data.points.len(), "image data loaded");
        let id = data.id;
        let name = data.name.clone();
        self.slot_mut(panel).image = Some(data);
        self.request(Request::ImagePixels { panel, id, name });
        Redraw::panel(panel)
    }

    fn on_pixels(&mut self, panel: Panel, token: RequestToken, decoded: DecodedImage) -> Redraw {
        let slot = self.slot_mut(panel);
        slot.pixels = Some(PanelPixels {
            revision: token,
            image: Arc::new(decoded),
        });
        slot.refit(false);
        Redraw::panel(panel)
    }

    fn on_candidates(&mut self, list: Vec<ImageId>) -> Redraw {
        self.candidates = list;
        match self.selected(Panel::B) {
            Some(b) if self.candidates.contains(&b) => self.select_b(Some(b)),
            Some(_) => self.select_b(None),
            None => {}
        }
        Redraw::ALL
    }

    fn on_matches(&mut self, class: MatchClass, list: Vec<Match>) -> Redraw {
        debug!(%class, count = list.len(), "matches loaded");
        self.matches.set(class, list);
        self.derived = self.matches.derive();
        Redraw::ALL
    }
}
