//! Interactive components bound to regenerated regions.
//!
//! Every component is derived from the page alone (classes and attributes), so
//! [`WidgetRegistry::rebind`] can run after any hydration without tracking
//! which regions were already initialised. State changes are written back to
//! the page through each component's `apply`.

use crate::hydrate::page::{Element, Page};
use crate::hydrate::sections::selectors::{
    FAQ_LIST, PORTFOLIO_GRID, RESULTS_GRID, SOCIAL_PROOF_GRID, TESTIMONIALS_GRID, TESTIMONIAL_DOTS,
};
use std::time::Duration;

pub const COUNTER_DURATION: Duration = Duration::from_millis(2000);
pub const CAROUSEL_GAP: f64 = 16.0;
const SLIDER_STEP: f64 = 2.0;
const SLIDER_POSITION: &str = "--slider-position";

/// FAQ accordion: at most one entry open at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accordion {
    open: Vec<bool>,
}

impl Accordion {
    pub fn attach(list: &Element) -> Self {
        let open = list
            .child_elements()
            .iter()
            .filter(|el| el.has_class("faq-item"))
            .map(|el| el.get_attr("open").is_some())
            .collect();
        Self { open }
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open.get(index).copied().unwrap_or(false)
    }

    pub fn open_entries(&self) -> Vec<usize> {
        (0..self.open.len()).filter(|i| self.open[*i]).collect()
    }

    /// 打開一項時自動收合其他已打開的項目
    pub fn toggle(&mut self, index: usize) {
        let Some(current) = self.open.get(index).copied() else {
            return;
        };
        if current {
            self.open[index] = false;
            return;
        }
        for (i, open) in self.open.iter_mut().enumerate() {
            *open = i == index;
        }
    }

    pub fn apply(&self, page: &mut Page) {
        let Some(list) = page.first_mut(FAQ_LIST) else {
            return;
        };
        let items = list
            .child_elements_mut()
            .iter_mut()
            .filter(|el| el.has_class("faq-item"));
        for (item, open) in items.zip(&self.open) {
            if *open {
                item.set_attr("open", "");
            } else {
                item.remove_attr("open");
            }
        }
    }
}

pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// Splits `prefix:$;suffix:+` into `("$", "+")`.
pub fn parse_format(format: &str) -> (String, String) {
    let mut prefix = String::new();
    let mut suffix = String::new();
    for part in format.split(';') {
        if let Some(value) = part.strip_prefix("prefix:") {
            prefix = value.to_string();
        }
        if let Some(value) = part.strip_prefix("suffix:") {
            suffix = value.to_string();
        }
    }
    (prefix, suffix)
}

/// Count-up animation for a stat number.
#[derive(Debug, Clone, PartialEq)]
pub struct Counter {
    target: f64,
    prefix: String,
    suffix: String,
    counted: bool,
}

impl Counter {
    pub fn new(target: f64, format: &str) -> Self {
        let (prefix, suffix) = parse_format(format);
        Self {
            target,
            prefix,
            suffix,
            counted: false,
        }
    }

    pub fn attach(element: &Element) -> Option<Self> {
        let target = element.get_attr("data-target")?.parse::<f64>().ok()?;
        let mut counter = Self::new(target, element.get_attr("data-format").unwrap_or(""));
        counter.counted = element.has_class("counted");
        Some(counter)
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn is_counted(&self) -> bool {
        self.counted
    }

    /// Marks the counter as started; a counter only ever animates once.
    pub fn start(&mut self) -> bool {
        if self.counted {
            return false;
        }
        self.counted = true;
        true
    }

    pub fn value_at(&self, elapsed: Duration) -> i64 {
        let progress = (elapsed.as_secs_f64() / COUNTER_DURATION.as_secs_f64()).min(1.0);
        (ease_out_cubic(progress) * self.target).round() as i64
    }

    pub fn display_at(&self, elapsed: Duration) -> String {
        format!("{}{}{}", self.prefix, self.value_at(elapsed), self.suffix)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderKey {
    ArrowLeft,
    ArrowDown,
    ArrowRight,
    ArrowUp,
    Home,
    End,
}

/// Before/after comparison slider; position is a percentage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeforeAfterSlider {
    position: f64,
}

impl Default for BeforeAfterSlider {
    fn default() -> Self {
        Self { position: 50.0 }
    }
}

impl BeforeAfterSlider {
    pub fn attach(element: &Element) -> Self {
        let position = element
            .get_attr("style")
            .and_then(|style| {
                style
                    .strip_prefix(SLIDER_POSITION)?
                    .trim_start_matches(':')
                    .trim()
                    .trim_end_matches('%')
                    .parse::<f64>()
                    .ok()
            })
            .unwrap_or(50.0);
        Self {
            position: position.clamp(0.0, 100.0),
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn set_position(&mut self, position: f64) {
        self.position = position.clamp(0.0, 100.0);
    }

    pub fn set_from_pointer(&mut self, client_x: f64, left: f64, width: f64) {
        if width <= 0.0 {
            return;
        }
        self.set_position((client_x - left) / width * 100.0);
    }

    pub fn handle_key(&mut self, key: SliderKey) {
        let position = match key {
            SliderKey::ArrowLeft | SliderKey::ArrowDown => self.position - SLIDER_STEP,
            SliderKey::ArrowRight | SliderKey::ArrowUp => self.position + SLIDER_STEP,
            SliderKey::Home => 0.0,
            SliderKey::End => 100.0,
        };
        self.set_position(position);
    }

    pub fn aria_value_now(&self) -> u8 {
        self.position.round() as u8
    }

    fn apply_to(&self, slider: &mut Element) {
        slider.set_attr("style", format!("{}: {}%", SLIDER_POSITION, self.position));
        if let Some(handle) = slider.find_class_mut("ba-handle") {
            handle.set_attr("aria-valuenow", self.aria_value_now().to_string());
        }
    }
}

/// Mobile testimonial carousel: dots mirror the card scrolled into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestimonialCarousel {
    cards: usize,
    active: usize,
}

impl TestimonialCarousel {
    pub fn attach(grid: &Element, dots: Option<&Element>) -> Option<Self> {
        let mut cards = Vec::new();
        grid.find_all_class("testimonial-card", &mut cards);
        if cards.is_empty() {
            return None;
        }
        let active = dots
            .and_then(|d| d.child_elements().iter().position(|dot| dot.has_class("active")))
            .unwrap_or(0);
        Some(Self {
            cards: cards.len(),
            active: active.min(cards.len() - 1),
        })
    }

    pub fn active(&self) -> usize {
        self.active
    }

    /// Index of the card nearest the scroll offset, clamped to the last card.
    pub fn active_for_scroll(&self, scroll_left: f64, card_width: f64) -> usize {
        if card_width <= 0.0 {
            return self.active;
        }
        let index = (scroll_left / (card_width + CAROUSEL_GAP)).round().max(0.0) as usize;
        index.min(self.cards - 1)
    }

    pub fn on_scroll(&mut self, scroll_left: f64, card_width: f64) {
        self.active = self.active_for_scroll(scroll_left, card_width);
    }

    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.cards {
            return false;
        }
        self.active = index;
        true
    }

    pub fn apply(&self, page: &mut Page) {
        if let Some(dots) = page.first_mut(TESTIMONIAL_DOTS) {
            for (i, dot) in dots.child_elements_mut().iter_mut().enumerate() {
                if i == self.active {
                    dot.add_class("active");
                } else {
                    dot.remove_class("active");
                }
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetRegistry {
    pub accordion: Option<Accordion>,
    pub counters: Vec<Counter>,
    pub sliders: Vec<BeforeAfterSlider>,
    pub carousel: Option<TestimonialCarousel>,
}

impl WidgetRegistry {
    pub fn attach(page: &Page) -> Self {
        let mut registry = Self::default();
        registry.rebind(page);
        registry
    }

    /// Rebuilds every component from the current page.
    pub fn rebind(&mut self, page: &Page) {
        self.accordion = page.first(FAQ_LIST).map(Accordion::attach);

        self.counters.clear();
        for (selector, class) in [
            (SOCIAL_PROOF_GRID, "stat-number"),
            (RESULTS_GRID, "result-number"),
        ] {
            if let Some(grid) = page.first(selector) {
                let mut numbers = Vec::new();
                grid.find_all_class(class, &mut numbers);
                self.counters
                    .extend(numbers.into_iter().filter_map(Counter::attach));
            }
        }

        self.sliders.clear();
        if let Some(grid) = page.first(PORTFOLIO_GRID) {
            let mut sliders = Vec::new();
            grid.find_all_class("ba-slider", &mut sliders);
            self.sliders
                .extend(sliders.into_iter().map(BeforeAfterSlider::attach));
        }

        self.carousel = page
            .first(TESTIMONIALS_GRID)
            .and_then(|grid| TestimonialCarousel::attach(grid, page.first(TESTIMONIAL_DOTS)));

        tracing::debug!(
            "Widgets bound: {} counters, {} sliders, accordion: {}, carousel: {}",
            self.counters.len(),
            self.sliders.len(),
            self.accordion.is_some(),
            self.carousel.is_some()
        );
    }

    /// Writes slider positions back to the portfolio grid, in order.
    pub fn apply_sliders(&self, page: &mut Page) {
        let Some(grid) = page.first_mut(PORTFOLIO_GRID) else {
            return;
        };
        let mut index = 0;
        for wrapper in grid.child_elements_mut() {
            if let Some(slider) = wrapper.find_class_mut("ba-slider") {
                if let Some(state) = self.sliders.get(index) {
                    state.apply_to(slider);
                }
                index += 1;
            }
        }
    }
}
