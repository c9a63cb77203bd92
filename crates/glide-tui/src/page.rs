//! Landing page content, layout and reveal bindings
//!
//! The page is a retained [`Scene`] whose element ids stay stable across
//! relayouts, so mounted triggers keep pointing at the right boxes after a
//! resize. Document units are terminal cells: x in columns, y in rows.

use std::str::FromStr;

use glide_core::animation::PropertySet;
use glide_core::{
    EasingType, ElementId, Error, Property, Rect, RevealPreset, Scene, SectionBinding, UiConfig,
};
use unicode_width::UnicodeWidthStr;

/// Horizontal page padding in columns
const PAD: f64 = 2.0;
/// Gap between showcase cards in the pinned track
const TRACK_GAP: f64 = 3.0;
/// Width at which card grids switch to two columns
const WIDE: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    SmartHome,
    Metaverse,
}

impl Variant {
    pub fn name(self) -> &'static str {
        match self {
            Variant::SmartHome => "smart-home",
            Variant::Metaverse => "metaverse",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Variant::SmartHome => Variant::Metaverse,
            Variant::Metaverse => Variant::SmartHome,
        }
    }

    fn content(self) -> &'static PageContent {
        match self {
            Variant::SmartHome => &SMART_HOME,
            Variant::Metaverse => &METAVERSE,
        }
    }
}

impl FromStr for Variant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "smart-home" | "smarthome" | "home" => Ok(Variant::SmartHome),
            "metaverse" | "worlds" => Ok(Variant::Metaverse),
            other => Err(Error::Config(format!("unknown page variant: {}", other))),
        }
    }
}

struct Card {
    title: &'static str,
    body: &'static str,
}

struct Stat {
    value: &'static str,
    label: &'static str,
}

struct Gauge {
    label: &'static str,
    value: f64,
}

struct PageContent {
    brand: &'static str,
    nav: &'static [&'static str],
    hero: &'static str,
    services_heading: &'static str,
    services: &'static [Card],
    showcase_heading: &'static str,
    showcase: &'static [Card],
    about_heading: &'static str,
    about: &'static str,
    stats: &'static [Stat],
    gauges_heading: &'static str,
    gauges: &'static [Gauge],
    contact_heading: &'static str,
    contact: &'static [&'static str],
    footer: &'static str,
}

static SMART_HOME: PageContent = PageContent {
    brand: "KLS Tech Solutions",
    nav: &["Home", "Services", "Products", "About", "Contact"],
    hero: "Transform Your Home with Smart Automation",
    services_heading: "Services",
    services: &[
        Card {
            title: "Smart Home Strategy",
            body: "We map every room, appliance, and routine to design an automation blueprint that feels effortless from day one.",
        },
        Card {
            title: "AI Experience Design",
            body: "Custom voice and gesture journeys that surface the right scene, playlist, or workflow before you even ask.",
        },
        Card {
            title: "24/7 Concierge Monitoring",
            body: "A dedicated command center that keeps an eye on your ecosystem, resolves alerts, and ships updates while you sleep.",
        },
        Card {
            title: "Integration Lab",
            body: "From legacy lighting to the newest EV chargers, we make every gadget speak the same language.",
        },
    ],
    showcase_heading: "Intelligent systems built in-house",
    showcase: &[
        Card {
            title: "Aurora Control Hub",
            body: "An edge-compute automation brain that harmonizes lighting, climate, AV, and security into one adaptive scene.",
        },
        Card {
            title: "Sentinel Vision Suite",
            body: "Computer-vision safeguards that recognize patterns, predict anomalies, and alert the concierge desk instantly.",
        },
        Card {
            title: "Pulse Energy Canvas",
            body: "A live energy storyboard that balances solar, EV, and grid input to keep your residence efficient and resilient.",
        },
    ],
    about_heading: "We craft homes that feel choreographed, not automated.",
    about: "A small crew of systems architects tuning lighting, acoustics, security, and energy so every routine feels curated, from blueprint to lifetime concierge care.",
    stats: &[
        Stat {
            value: "480+",
            label: "Projects orchestrated",
        },
        Stat {
            value: "97%",
            label: "Client satisfaction",
        },
        Stat {
            value: "< 12 min",
            label: "Average response",
        },
    ],
    gauges_heading: "Performance at a glance",
    gauges: &[
        Gauge {
            label: "Automation uptime",
            value: 99.3,
        },
        Gauge {
            label: "Energy savings",
            value: 32.0,
        },
        Gauge {
            label: "Support resolution",
            value: 94.0,
        },
    ],
    contact_heading: "Tell us how your ideal day at home should feel.",
    contact: &[
        "Visit us: Bangalore, Karnataka, India",
        "Call: concierge desk, open 24/7",
        "Architects respond within one business day",
    ],
    footer: "KLS Tech Solutions. Homes that respond before you ask.",
};

static METAVERSE: PageContent = PageContent {
    brand: "Meridian Worlds",
    nav: &["Home", "Experiences", "Worlds", "About", "Contact"],
    hero: "Step Into Worlds Built for Gathering",
    services_heading: "Experiences",
    services: &[
        Card {
            title: "World Building",
            body: "Persistent spaces designed with your brand, tuned for crowds, and ready for every headset and browser.",
        },
        Card {
            title: "Live Events",
            body: "Concerts, launches, and keynotes staged in real time with production crews inside the world.",
        },
        Card {
            title: "Avatar Studio",
            body: "Expressive avatars with wardrobe systems that carry across every world you open.",
        },
        Card {
            title: "Creator Economy",
            body: "Storefronts, tickets, and rewards that let communities build and earn together.",
        },
    ],
    showcase_heading: "Explore the worlds",
    showcase: &[
        Card {
            title: "Neon Harbor",
            body: "A rain-lit port city of rooftop venues and floating markets.",
        },
        Card {
            title: "Lumen Gardens",
            body: "Bioluminescent terraces for quiet meetups and gallery walks.",
        },
        Card {
            title: "Aether Arena",
            body: "A modular stadium hosting tournaments for thousands of players.",
        },
        Card {
            title: "Orbit Commons",
            body: "A zero-gravity plaza where teams gather between missions.",
        },
        Card {
            title: "Tidal Archive",
            body: "An underwater library of community-made artifacts and stories.",
        },
    ],
    about_heading: "Worlds that feel alive before anyone logs in.",
    about: "A studio of engine programmers, world designers, and event producers shipping shared spaces that stay fast, fair, and full of people.",
    stats: &[
        Stat {
            value: "120+",
            label: "Worlds launched",
        },
        Stat {
            value: "2.4M",
            label: "Monthly visits",
        },
        Stat {
            value: "< 40 ms",
            label: "Median latency",
        },
    ],
    gauges_heading: "How we compare",
    gauges: &[
        Gauge {
            label: "Session retention",
            value: 87.0,
        },
        Gauge {
            label: "Creator payouts",
            value: 64.0,
        },
        Gauge {
            label: "Frame stability",
            value: 99.0,
        },
    ],
    contact_heading: "Bring your community somewhere new.",
    contact: &[
        "Studio: remote-first, every timezone",
        "Events desk: live support during launches",
        "Producers reply within one business day",
    ],
    footer: "Meridian Worlds. See you inside.",
};

/// What an element draws
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Layout-only container
    Section,
    Backdrop,
    Title(&'static str),
    Heading(&'static str),
    Text(&'static str),
    Card {
        title: &'static str,
        body: &'static str,
    },
    Stat {
        value: &'static str,
        label: &'static str,
    },
    Gauge {
        label: &'static str,
        value: f64,
    },
    Footer(&'static str),
}

#[derive(Debug, Clone)]
pub struct Node {
    pub id: ElementId,
    pub kind: NodeKind,
}

/// Structural elements the layout positions by hand
#[derive(Debug, Clone)]
struct Ids {
    hero: ElementId,
    backdrop: ElementId,
    title: ElementId,
    services: ElementId,
    services_heading: ElementId,
    services_grid: ElementId,
    cards: Vec<ElementId>,
    showcase: ElementId,
    showcase_heading: ElementId,
    track: ElementId,
    showcase_cards: Vec<ElementId>,
    about: ElementId,
    about_heading: ElementId,
    about_text: ElementId,
    stats_row: ElementId,
    stats: Vec<ElementId>,
    gauges: ElementId,
    gauges_heading: ElementId,
    gauge_bars: Vec<ElementId>,
    contact: ElementId,
    contact_heading: ElementId,
    contact_lines: Vec<ElementId>,
    footer: ElementId,
}

pub struct Page {
    variant: Variant,
    scene: Scene,
    nodes: Vec<Node>,
    ids: Ids,
    bindings: Vec<SectionBinding>,
    width: f64,
    height: f64,
    pin_range: f64,
}

impl Page {
    pub fn new(variant: Variant, ui: &UiConfig) -> Self {
        let content = variant.content();
        let mut scene = Scene::new();
        let mut nodes = Vec::new();
        let mut add = |scene: &mut Scene, parent: Option<ElementId>, name: String, kind: NodeKind| {
            let id = match parent {
                Some(parent) => scene.insert_child(parent, name, Rect::default()),
                None => scene.insert(name, Rect::default()),
            };
            nodes.push(Node { id, kind });
            id
        };

        let hero = add(&mut scene, None, "hero".into(), NodeKind::Section);
        let backdrop = add(&mut scene, Some(hero), "hero-backdrop".into(), NodeKind::Backdrop);
        let title = add(&mut scene, Some(hero), "hero-title".into(), NodeKind::Title(content.hero));

        let services = add(&mut scene, None, "services".into(), NodeKind::Section);
        let services_heading = add(
            &mut scene,
            Some(services),
            "services-heading".into(),
            NodeKind::Heading(content.services_heading),
        );
        let services_grid = add(&mut scene, Some(services), "services-grid".into(), NodeKind::Section);
        let cards = content
            .services
            .iter()
            .enumerate()
            .map(|(i, card)| {
                add(
                    &mut scene,
                    Some(services_grid),
                    format!("service-{}", i),
                    NodeKind::Card {
                        title: card.title,
                        body: card.body,
                    },
                )
            })
            .collect();

        let showcase = add(&mut scene, None, "showcase".into(), NodeKind::Section);
        let showcase_heading = add(
            &mut scene,
            Some(showcase),
            "showcase-heading".into(),
            NodeKind::Heading(content.showcase_heading),
        );
        let track = add(&mut scene, Some(showcase), "showcase-track".into(), NodeKind::Section);
        let showcase_cards = content
            .showcase
            .iter()
            .enumerate()
            .map(|(i, card)| {
                add(
                    &mut scene,
                    Some(track),
                    format!("showcase-{}", i),
                    NodeKind::Card {
                        title: card.title,
                        body: card.body,
                    },
                )
            })
            .collect();

        let about = add(&mut scene, None, "about".into(), NodeKind::Section);
        let about_heading = add(
            &mut scene,
            Some(about),
            "about-heading".into(),
            NodeKind::Heading(content.about_heading),
        );
        let about_text = add(&mut scene, Some(about), "about-text".into(), NodeKind::Text(content.about));
        let stats_row = add(&mut scene, Some(about), "stats".into(), NodeKind::Section);
        let stats = content
            .stats
            .iter()
            .enumerate()
            .map(|(i, stat)| {
                add(
                    &mut scene,
                    Some(stats_row),
                    format!("stat-{}", i),
                    NodeKind::Stat {
                        value: stat.value,
                        label: stat.label,
                    },
                )
            })
            .collect();
        let gauges = add(&mut scene, Some(about), "gauges".into(), NodeKind::Section);
        let gauges_heading = add(
            &mut scene,
            Some(gauges),
            "gauges-heading".into(),
            NodeKind::Heading(content.gauges_heading),
        );
        let gauge_bars = content
            .gauges
            .iter()
            .enumerate()
            .map(|(i, gauge)| {
                add(
                    &mut scene,
                    Some(gauges),
                    format!("gauge-{}", i),
                    NodeKind::Gauge {
                        label: gauge.label,
                        value: gauge.value,
                    },
                )
            })
            .collect();

        let contact = add(&mut scene, None, "contact".into(), NodeKind::Section);
        let contact_heading = add(
            &mut scene,
            Some(contact),
            "contact-heading".into(),
            NodeKind::Heading(content.contact_heading),
        );
        let contact_lines = content
            .contact
            .iter()
            .enumerate()
            .map(|(i, line)| add(&mut scene, Some(contact), format!("contact-{}", i), NodeKind::Text(*line)))
            .collect();
        let footer = add(&mut scene, None, "footer".into(), NodeKind::Footer(content.footer));

        let ids = Ids {
            hero,
            backdrop,
            title,
            services,
            services_heading,
            services_grid,
            cards,
            showcase,
            showcase_heading,
            track,
            showcase_cards,
            about,
            about_heading,
            about_text,
            stats_row,
            stats,
            gauges,
            gauges_heading,
            gauge_bars,
            contact,
            contact_heading,
            contact_lines,
            footer,
        };
        let bindings = bindings(&ids, 1.0 / ui.cell_width_px, 1.0 / ui.cell_height_px);

        Self {
            variant,
            scene,
            nodes,
            ids,
            bindings,
            width: 0.0,
            height: 0.0,
            pin_range: 0.0,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn brand(&self) -> &'static str {
        self.variant.content().brand
    }

    pub fn nav(&self) -> &'static [&'static str] {
        self.variant.content().nav
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Drawable elements, parents before children
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Section bindings to mount, in page order
    pub fn bindings(&self) -> &[SectionBinding] {
        &self.bindings
    }

    /// Document height in rows, pin spacing included
    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// Vertical rows the pinned showcase consumes
    pub fn pin_range(&self) -> f64 {
        self.pin_range
    }

    /// Document row where the pinned showcase starts
    pub fn showcase_top(&self) -> f64 {
        self.scene.element(self.ids.showcase).map(|e| e.bounds.top()).unwrap_or_default()
    }

    /// Top row of every top-level section, for page jumps
    pub fn section_tops(&self) -> Vec<f64> {
        [
            self.ids.hero,
            self.ids.services,
            self.ids.showcase,
            self.ids.about,
            self.ids.contact,
            self.ids.footer,
        ]
        .iter()
        .filter_map(|&id| self.scene.element(id))
        .map(|e| e.bounds.top())
        .collect()
    }

    /// Position every element for a terminal `width` and viewport height
    pub fn layout(&mut self, width: u16, viewport_height: u16) {
        let content = self.variant.content();
        let w = f64::from(width.max(1));
        let vh = f64::from(viewport_height.max(1));
        let inner = (w - 2.0 * PAD).max(1.0);
        let ids = self.ids.clone();
        let scene = &mut self.scene;

        // Hero fills the first screen
        scene.set_bounds(ids.hero, Rect::new(0.0, 0.0, w, vh));
        scene.set_bounds(ids.backdrop, Rect::new(0.0, 0.0, w, vh));
        let title_rows = text_rows(content.hero, inner);
        scene.set_bounds(ids.title, Rect::new(PAD, (vh / 3.0).floor(), inner, title_rows));
        let mut y = vh;

        // Services grid
        let top = y;
        y += 2.0;
        y = place_heading(scene, ids.services_heading, content.services_heading, inner, y);
        let columns = if w >= WIDE { 2 } else { 1 };
        let card_width = ((inner - 2.0 * (columns as f64 - 1.0)) / columns as f64).floor().max(1.0);
        let grid_top = y;
        for (row, chunk) in ids.cards.chunks(columns).enumerate() {
            let first = row * columns;
            let row_height = content.services[first..first + chunk.len()]
                .iter()
                .map(|card| card_rows(card.body, card_width))
                .fold(0.0, f64::max);
            for (col, &id) in chunk.iter().enumerate() {
                let x = PAD + col as f64 * (card_width + 2.0);
                scene.set_bounds(id, Rect::new(x, y, card_width, row_height));
            }
            y += row_height + 1.0;
        }
        scene.set_bounds(ids.services_grid, Rect::new(PAD, grid_top, inner, y - grid_top));
        y += 1.0;
        scene.set_bounds(ids.services, Rect::new(0.0, top, w, y - top));

        // Pinned showcase: one screen tall, followed by as many rows as the
        // track overflows horizontally
        let top = y;
        scene.set_bounds(ids.showcase, Rect::new(0.0, top, w, vh));
        let track_top = place_heading(scene, ids.showcase_heading, content.showcase_heading, inner, top + 1.0);
        let card_width = (w * 0.6).clamp(24.0, 48.0).floor();
        let card_height = content
            .showcase
            .iter()
            .map(|card| card_rows(card.body, card_width))
            .fold(0.0, f64::max)
            .min((top + vh - track_top - 1.0).max(3.0));
        let count = ids.showcase_cards.len() as f64;
        let track_width = count * card_width + (count - 1.0).max(0.0) * TRACK_GAP + 2.0 * PAD;
        scene.set_bounds(ids.track, Rect::new(0.0, track_top, track_width, card_height));
        for (i, &id) in ids.showcase_cards.iter().enumerate() {
            let x = PAD + i as f64 * (card_width + TRACK_GAP);
            scene.set_bounds(id, Rect::new(x, track_top, card_width, card_height));
        }
        self.pin_range = (track_width - w).max(0.0);
        y = top + vh + self.pin_range;

        // About: copy, stat cards, gauges
        let top = y;
        y += 2.0;
        y = place_heading(scene, ids.about_heading, content.about_heading, inner, y);
        let about_rows = text_rows(content.about, inner);
        scene.set_bounds(ids.about_text, Rect::new(PAD, y, inner, about_rows));
        y += about_rows + 1.0;

        let columns = if w >= 72.0 { ids.stats.len().max(1) } else { 1 };
        let stat_width = ((inner - 2.0 * (columns as f64 - 1.0)) / columns as f64).floor().max(1.0);
        let stats_top = y;
        for (row, chunk) in ids.stats.chunks(columns).enumerate() {
            let row_y = stats_top + row as f64 * 5.0;
            for (col, &id) in chunk.iter().enumerate() {
                let x = PAD + col as f64 * (stat_width + 2.0);
                scene.set_bounds(id, Rect::new(x, row_y, stat_width, 4.0));
            }
            y = row_y + 5.0;
        }
        scene.set_bounds(ids.stats_row, Rect::new(PAD, stats_top, inner, y - stats_top));

        y += 1.0;
        let gauges_top = y;
        y = place_heading(scene, ids.gauges_heading, content.gauges_heading, inner, y);
        for &id in &ids.gauge_bars {
            scene.set_bounds(id, Rect::new(PAD, y, inner, 2.0));
            y += 3.0;
        }
        scene.set_bounds(ids.gauges, Rect::new(PAD, gauges_top, inner, y - gauges_top));
        y += 1.0;
        scene.set_bounds(ids.about, Rect::new(0.0, top, w, y - top));

        // Contact
        let top = y;
        y += 2.0;
        y = place_heading(scene, ids.contact_heading, content.contact_heading, inner, y);
        for &id in &ids.contact_lines {
            scene.set_bounds(id, Rect::new(PAD, y, inner, 1.0));
            y += 1.0;
        }
        y += 2.0;
        scene.set_bounds(ids.contact, Rect::new(0.0, top, w, y - top));

        scene.set_bounds(ids.footer, Rect::new(0.0, y, w, 3.0));
        y += 3.0;

        self.width = w;
        self.height = y;
    }
}

fn bindings(ids: &Ids, horizontal: f64, vertical: f64) -> Vec<SectionBinding> {
    let px = |preset: RevealPreset| preset.scale_distance(horizontal, vertical);
    vec![
        SectionBinding::intro("hero-backdrop", ids.backdrop, RevealPreset::hero_backdrop()),
        SectionBinding::intro("hero-title", ids.title, px(RevealPreset::hero_title())),
        SectionBinding::reveal("services", ids.services, px(RevealPreset::section()))
            .with_targets(vec![ids.services_heading]),
        SectionBinding::reveal("service-cards", ids.services_grid, px(RevealPreset::cards()))
            .with_targets(ids.cards.clone()),
        SectionBinding::pinned("showcase", ids.showcase, ids.track),
        SectionBinding::reveal("about", ids.about, px(RevealPreset::section()))
            .with_targets(vec![ids.about_heading, ids.about_text]),
        SectionBinding::reveal("stats", ids.stats_row, px(RevealPreset::stats()))
            .with_targets(ids.stats.clone()),
        SectionBinding::scrub("gauges", ids.gauges, gauge_fill()).with_targets(ids.gauge_bars.clone()),
        SectionBinding::reveal("contact", ids.contact, px(RevealPreset::contact()))
            .with_targets(
                std::iter::once(ids.contact_heading)
                    .chain(ids.contact_lines.iter().copied())
                    .collect(),
            ),
        SectionBinding::reveal("footer", ids.footer, px(RevealPreset::footer())),
    ]
}

/// Gauge bars fill as their block scrolls into view
fn gauge_fill() -> RevealPreset {
    RevealPreset {
        from: PropertySet::new().with(Property::Scale, 0.0),
        to: PropertySet::new().with(Property::Scale, 1.0),
        ..RevealPreset::fade_up(0.0, 800, EasingType::Power2Out)
    }
}

fn place_heading(scene: &mut Scene, id: ElementId, text: &str, width: f64, y: f64) -> f64 {
    let rows = text_rows(text, width);
    scene.set_bounds(id, Rect::new(PAD, y, width, rows));
    y + rows + 1.0
}

fn text_rows(text: &str, width: f64) -> f64 {
    wrap(text, width as usize).len() as f64
}

/// Border, title and wrapped body
fn card_rows(body: &str, width: f64) -> f64 {
    3.0 + text_rows(body, (width - 4.0).max(1.0))
}

/// Greedy word wrap by display width
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let needed = if line.is_empty() {
            word.width()
        } else {
            line.width() + 1 + word.width()
        };
        if needed > width && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}
