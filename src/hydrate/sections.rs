//! Per-collection page rewrites. Each function touches only its own regions
//! and only with values that are present and non-empty.

use crate::domain::model::{
    AboutSection, Asset, ContactInfo, Faq, HeroSection, HowItWorksStep, PortfolioItem,
    ResultsSection, Service, ServiceArea, SiteContent, SiteSettings, StatValue, Testimonial,
    WhyStagingSection,
};
use crate::hydrate::page::{Element, Page};
use crate::utils::format::{format_phone, phone_href};

pub mod selectors {
    pub const HERO_HEADING: &str = ".hero-content h1";
    pub const HERO_SUBTITLE: &str = ".hero-subtitle";
    pub const HERO_PRIMARY_CTA: &str = ".hero-ctas .btn--primary";
    pub const HERO_SECONDARY_CTA: &str = ".hero-ctas .btn--outline";
    pub const HERO_BACKGROUND: &str = ".hero-bg img";

    pub const SOCIAL_PROOF_GRID: &str = ".social-proof-grid";

    pub const WHY_EYEBROW: &str = ".why-staging .eyebrow";
    pub const WHY_HEADING: &str = ".why-staging h2";
    pub const WHY_TEXT: &str = ".why-staging-text";
    pub const WHY_POINTS: &str = ".why-staging-points";
    pub const WHY_IMAGE: &str = ".why-staging-image img";

    pub const SERVICES_GRID: &str = ".services-grid";
    pub const PORTFOLIO_GRID: &str = ".portfolio-grid";

    pub const RESULTS_EYEBROW: &str = ".results .eyebrow";
    pub const RESULTS_HEADING: &str = ".results h2";
    pub const RESULTS_GRID: &str = ".results-grid";

    pub const STEPS: &str = ".steps";

    pub const TESTIMONIALS_GRID: &str = ".testimonials-grid";
    pub const TESTIMONIAL_DOTS: &str = ".testimonial-dots";

    pub const ABOUT_EYEBROW: &str = ".about .eyebrow";
    pub const ABOUT_HEADING: &str = ".about h2";
    pub const ABOUT_TEXT: &str = ".about-text";
    pub const ABOUT_CREDENTIALS: &str = ".about-credentials";
    pub const ABOUT_IMAGE: &str = ".about-image img";

    pub const AREA_REGIONS: &str = ".area-regions";
    pub const FAQ_LIST: &str = ".faq-list";

    pub const CONTACT_EYEBROW: &str = ".contact-info .eyebrow";
    pub const CONTACT_HEADING: &str = ".contact-info h2";
    pub const CONTACT_DESCRIPTION: &str = ".contact-info > p";
    pub const HEADER_PHONE: &str = ".header-phone";
    pub const CONTACT_PHONE: &str = ".contact-details a[href^=\"tel:\"]";
    pub const MOBILE_PHONE: &str = ".mobile-nav-contact a[href^=\"tel:\"]";
    pub const CONTACT_EMAIL: &str = ".contact-details a[href^=\"mailto:\"]";

    pub const FOOTER_DESCRIPTION: &str = ".footer-brand > p";
    pub const FORM_NOTE: &str = ".form-note";

    /// Contact and footer link selectors for one social network.
    pub fn social_links(network: &str) -> [String; 2] {
        [
            format!(".contact-social a[aria-label*=\"{}\"]", network),
            format!(".footer-social a[aria-label*=\"{}\"]", network),
        ]
    }
}

use selectors::*;

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn non_empty<T>(list: &Option<Vec<T>>) -> Option<&[T]> {
    list.as_deref().filter(|items| !items.is_empty())
}

fn text_of(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// `500.0` → `"500"`, `2.5` → `"2.5"`
pub fn number_attr(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn reveal(tag: &str, class: &str, delay: usize) -> Element {
    let class = if class.is_empty() {
        "reveal reveal--visible".to_string()
    } else {
        format!("{} reveal reveal--visible", class)
    };
    Element::with_class(tag, &class).attr("data-delay", delay.to_string())
}

fn check_icon() -> Element {
    Element::new("svg")
        .attr("xmlns", "http://www.w3.org/2000/svg")
        .attr("viewBox", "0 0 24 24")
        .attr("fill", "none")
        .attr("stroke", "currentColor")
        .attr("stroke-width", "2")
        .attr("aria-hidden", "true")
        .child(Element::new("path").attr("d", "M22 11.08V12a10 10 0 11-5.93-9.14"))
        .child(Element::new("polyline").attr("points", "22 4 12 14.01 9 11.01"))
}

fn star_icon() -> Element {
    Element::new("svg")
        .attr("xmlns", "http://www.w3.org/2000/svg")
        .attr("viewBox", "0 0 24 24")
        .attr("aria-hidden", "true")
        .child(Element::new("polygon").attr(
            "points",
            "12 2 15.09 8.26 22 9.27 17 14.14 18.18 21.02 12 17.77 5.82 21.02 7 14.14 2 9.27 8.91 8.26 12 2",
        ))
}

fn chevron_icon() -> Element {
    Element::with_class("svg", "faq-chevron")
        .attr("xmlns", "http://www.w3.org/2000/svg")
        .attr("viewBox", "0 0 24 24")
        .attr("fill", "none")
        .attr("stroke", "currentColor")
        .attr("stroke-width", "2")
        .attr("aria-hidden", "true")
        .child(Element::new("polyline").attr("points", "6 9 12 15 18 9"))
}

fn set_image(page: &mut Page, selector: &str, asset: &Option<Asset>) -> bool {
    page.set_attr(selector, "src", Asset::url(asset))
}

/// 覆寫既有段落（依序），不新增也不刪除
fn overwrite_paragraphs(container: &mut Element, paragraphs: &[String]) {
    let targets = container
        .child_elements_mut()
        .iter_mut()
        .filter(|el| el.tag() == "p" && !el.has_class("eyebrow"));
    for (paragraph, text) in targets.zip(paragraphs) {
        if !text.is_empty() {
            paragraph.set_text(text.as_str());
        }
    }
}

pub fn hydrate_hero(page: &mut Page, hero: &HeroSection) {
    page.set_text(HERO_HEADING, present(&hero.heading));
    page.set_text(HERO_SUBTITLE, present(&hero.subtitle));
    page.set_text(HERO_PRIMARY_CTA, present(&hero.primary_cta_text));
    page.set_attr(HERO_PRIMARY_CTA, "href", present(&hero.primary_cta_link));
    page.set_text(HERO_SECONDARY_CTA, present(&hero.secondary_cta_text));
    page.set_attr(HERO_SECONDARY_CTA, "href", present(&hero.secondary_cta_link));
    set_image(page, HERO_BACKGROUND, &hero.background_image);
}

/// `prefix:$;suffix:+`, parts omitted when absent.
pub fn counter_format(prefix: Option<&str>, suffix: Option<&str>) -> String {
    let mut parts = Vec::new();
    if let Some(prefix) = prefix.filter(|p| !p.is_empty()) {
        parts.push(format!("prefix:{}", prefix));
    }
    if let Some(suffix) = suffix.filter(|s| !s.is_empty()) {
        parts.push(format!("suffix:{}", suffix));
    }
    parts.join(";")
}

fn counter_number(class: &str, value: Option<f64>, format: String) -> Element {
    let mut number = Element::with_class("div", class)
        .attr("data-target", number_attr(value.unwrap_or(0.0)))
        .text("0");
    if !format.is_empty() {
        number.set_attr("data-format", format);
    }
    number
}

pub fn hydrate_social_proof(page: &mut Page, stats: &[StatValue]) -> bool {
    let Some(grid) = page.first_mut(SOCIAL_PROOF_GRID) else {
        return false;
    };

    let items = stats
        .iter()
        .map(|stat| {
            let format = counter_format(stat.prefix.as_deref(), stat.suffix.as_deref());
            Element::with_class("div", "stat-item")
                .child(counter_number("stat-number", stat.value, format))
                .child(Element::with_class("div", "stat-label").text(text_of(&stat.label)))
        })
        .collect();
    grid.replace_children(items);
    true
}

pub fn hydrate_why_staging(page: &mut Page, section: &WhyStagingSection) {
    page.set_text(WHY_EYEBROW, present(&section.eyebrow));
    page.set_text(WHY_HEADING, present(&section.heading));

    if let (Some(paragraphs), Some(container)) =
        (non_empty(&section.paragraphs), page.first_mut(WHY_TEXT))
    {
        overwrite_paragraphs(container, paragraphs);
    }

    if let (Some(points), Some(container)) =
        (non_empty(&section.bullet_points), page.first_mut(WHY_POINTS))
    {
        let items = points
            .iter()
            .map(|point| {
                Element::with_class("div", "why-staging-point")
                    .child(check_icon())
                    .child(Element::new("span").text(point.as_str()))
            })
            .collect();
        container.replace_children(items);
    }

    set_image(page, WHY_IMAGE, &section.image);
}

pub fn hydrate_services(page: &mut Page, services: &[Service]) -> bool {
    let Some(grid) = page.first_mut(SERVICES_GRID) else {
        return false;
    };

    let cards = services
        .iter()
        .enumerate()
        .map(|(i, service)| {
            let title = text_of(&service.title);
            reveal("div", "service-card", i % 3 + 1)
                .child(
                    Element::with_class("div", "service-card-image").child(
                        Element::new("img")
                            .attr("src", Asset::url(&service.image).unwrap_or_default())
                            .attr("alt", title.as_str())
                            .attr("loading", "lazy")
                            .attr("width", "600")
                            .attr("height", "400"),
                    ),
                )
                .child(
                    Element::with_class("div", "service-card-body")
                        .child(Element::new("h3").text(title.as_str()))
                        .child(Element::new("p").text(text_of(&service.description))),
                )
        })
        .collect();
    grid.replace_children(cards);
    true
}

fn slider_handle() -> Element {
    Element::with_class("div", "ba-handle")
        .attr("role", "slider")
        .attr("aria-valuemin", "0")
        .attr("aria-valuemax", "100")
        .attr("aria-valuenow", "50")
        .attr("aria-label", "Before and after comparison slider")
        .attr("tabindex", "0")
        .child(Element::with_class("span", "ba-handle-line"))
        .child(Element::with_class("span", "ba-handle-circle"))
        .child(Element::with_class("span", "ba-handle-line"))
}

pub fn hydrate_portfolio(page: &mut Page, items: &[PortfolioItem]) -> bool {
    let Some(grid) = page.first_mut(PORTFOLIO_GRID) else {
        return false;
    };

    let entries = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let label = text_of(&item.label);
            let slider = Element::with_class("div", "ba-slider")
                .attr("data-slider", "")
                .child(
                    Element::with_class("img", "ba-after")
                        .attr("src", Asset::url(&item.after_image).unwrap_or_default())
                        .attr("alt", format!("After staging - {}", label))
                        .attr("loading", "lazy")
                        .attr("width", "800")
                        .attr("height", "600"),
                )
                .child(
                    Element::with_class("div", "ba-before-wrapper").child(
                        Element::with_class("img", "ba-before")
                            .attr("src", Asset::url(&item.before_image).unwrap_or_default())
                            .attr("alt", format!("Before staging - {}", label))
                            .attr("loading", "lazy")
                            .attr("width", "800")
                            .attr("height", "600"),
                    ),
                )
                .child(Element::with_class("span", "ba-label ba-label--before").text("Before"))
                .child(Element::with_class("span", "ba-label ba-label--after").text("After"))
                .child(slider_handle());

            reveal("div", "", i % 2 + 1)
                .child(slider)
                .child(Element::with_class("p", "portfolio-item-label").text(label))
        })
        .collect();
    grid.replace_children(entries);
    true
}

pub fn hydrate_results_heading(page: &mut Page, section: &ResultsSection) {
    page.set_text(RESULTS_EYEBROW, present(&section.eyebrow));
    page.set_text(RESULTS_HEADING, present(&section.heading));
}

/// 多字元前綴（如 "up to"）獨立成一行，單字元前綴併入計數器格式
pub fn result_format(stat: &StatValue) -> (Option<String>, String) {
    let prefix = stat.prefix.as_deref().filter(|p| !p.is_empty());
    let long_prefix = prefix.filter(|p| p.chars().count() > 1);

    let mut format = match stat.suffix.as_deref().filter(|s| !s.is_empty()) {
        Some(suffix) => format!("suffix:{}", suffix),
        None => String::new(),
    };
    if let Some(short) = prefix.filter(|p| p.chars().count() <= 1) {
        if !format.is_empty() {
            format.push(';');
        }
        format.push_str(&format!("prefix:{}", short));
    }

    (long_prefix.map(str::to_string), format)
}

pub fn hydrate_result_stats(page: &mut Page, stats: &[StatValue]) -> bool {
    let Some(grid) = page.first_mut(RESULTS_GRID) else {
        return false;
    };

    let items = stats
        .iter()
        .enumerate()
        .map(|(i, stat)| {
            let (long_prefix, format) = result_format(stat);
            let mut item = reveal("div", "result-item", i + 1);
            if let Some(prefix) = long_prefix {
                item = item.child(Element::with_class("div", "result-prefix").text(prefix));
            }
            item = item
                .child(counter_number("result-number", stat.value, format))
                .child(Element::with_class("div", "result-label").text(text_of(&stat.label)));
            if let Some(description) = present(&stat.description) {
                item = item.child(Element::with_class("div", "result-desc").text(description));
            }
            item
        })
        .collect();
    grid.replace_children(items);
    true
}

pub fn hydrate_how_it_works(page: &mut Page, steps: &[HowItWorksStep]) -> bool {
    let Some(container) = page.first_mut(STEPS) else {
        return false;
    };

    let items = steps
        .iter()
        .enumerate()
        .map(|(i, step)| {
            reveal("div", "step", i + 1)
                .child(Element::with_class("div", "step-number").text((i + 1).to_string()))
                .child(Element::new("h3").text(text_of(&step.title)))
                .child(Element::new("p").text(text_of(&step.description)))
        })
        .collect();
    container.replace_children(items);
    true
}

pub fn hydrate_testimonials(page: &mut Page, testimonials: &[Testimonial]) -> bool {
    let Some(grid) = page.first_mut(TESTIMONIALS_GRID) else {
        return false;
    };

    let cards = testimonials
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let stars = t.stars.unwrap_or(0).min(5);
            reveal("div", "testimonial-card", i + 1)
                .child(
                    Element::with_class("div", "testimonial-quote-mark")
                        .attr("aria-hidden", "true")
                        .text("\u{201c}"),
                )
                .child(Element::with_class("p", "testimonial-text").text(text_of(&t.quote)))
                .child(
                    Element::with_class("div", "testimonial-stars")
                        .attr("aria-label", format!("{} out of 5 stars", stars))
                        .children((0..stars).map(|_| star_icon())),
                )
                .child(Element::with_class("p", "testimonial-author").text(text_of(&t.author_name)))
                .child(Element::with_class("p", "testimonial-role").text(text_of(&t.author_role)))
        })
        .collect();
    grid.replace_children(cards);

    if let Some(dots) = page.first_mut(TESTIMONIAL_DOTS) {
        let buttons = (0..testimonials.len())
            .map(|i| {
                let class = if i == 0 {
                    "testimonial-dot active"
                } else {
                    "testimonial-dot"
                };
                Element::with_class("button", class)
                    .attr("aria-label", format!("Show testimonial {}", i + 1))
            })
            .collect();
        dots.replace_children(buttons);
    }
    true
}

pub fn hydrate_about(page: &mut Page, section: &AboutSection) {
    page.set_text(ABOUT_EYEBROW, present(&section.eyebrow));
    page.set_text(ABOUT_HEADING, present(&section.heading));

    if let (Some(paragraphs), Some(container)) =
        (non_empty(&section.paragraphs), page.first_mut(ABOUT_TEXT))
    {
        overwrite_paragraphs(container, paragraphs);
    }

    if let (Some(credentials), Some(container)) =
        (non_empty(&section.credentials), page.first_mut(ABOUT_CREDENTIALS))
    {
        let items = credentials
            .iter()
            .map(|credential| {
                Element::with_class("div", "credential")
                    .child(check_icon())
                    .text(format!(" {}", credential))
            })
            .collect();
        container.replace_children(items);
    }

    set_image(page, ABOUT_IMAGE, &section.image);
}

pub fn hydrate_service_areas(page: &mut Page, areas: &[ServiceArea]) -> bool {
    let Some(container) = page.first_mut(AREA_REGIONS) else {
        return false;
    };

    let regions = areas
        .iter()
        .map(|area| {
            let names = area.areas.as_deref().unwrap_or_default();
            Element::with_class("div", "area-region")
                .child(Element::new("h3").text(text_of(&area.region)))
                .child(
                    Element::new("ul")
                        .children(names.iter().map(|name| Element::new("li").text(name.as_str()))),
                )
        })
        .collect();
    container.replace_children(regions);
    true
}

pub fn hydrate_faqs(page: &mut Page, faqs: &[Faq]) -> bool {
    let Some(list) = page.first_mut(FAQ_LIST) else {
        return false;
    };

    let entries = faqs
        .iter()
        .map(|faq| {
            Element::with_class("details", "faq-item reveal reveal--visible")
                .child(
                    Element::new("summary")
                        .child(Element::with_class("span", "faq-question").text(text_of(&faq.question)))
                        .child(chevron_icon()),
                )
                .child(
                    Element::with_class("div", "faq-answer")
                        .child(Element::new("p").text(text_of(&faq.answer))),
                )
        })
        .collect();
    list.replace_children(entries);
    true
}

pub fn hydrate_contact(page: &mut Page, info: &ContactInfo) {
    page.set_text(CONTACT_EYEBROW, present(&info.eyebrow));
    page.set_text(CONTACT_HEADING, present(&info.heading));
    page.set_text(CONTACT_DESCRIPTION, present(&info.description));

    if let Some(phone) = present(&info.phone) {
        let display = format_phone(phone);
        let href = phone_href(phone);

        for link in page.all_mut(HEADER_PHONE) {
            link.set_attr("href", href.as_str());
            link.set_text(display.as_str());
        }
        for selector in [CONTACT_PHONE, MOBILE_PHONE] {
            if let Some(link) = page.first_mut(selector) {
                link.set_attr("href", href.as_str());
                link.set_text(display.as_str());
            }
        }
    }

    if let Some(email) = present(&info.email) {
        if let Some(link) = page.first_mut(CONTACT_EMAIL) {
            link.set_attr("href", format!("mailto:{}", email));
            link.set_text(email);
        }
    }

    let networks = [
        ("Instagram", &info.instagram_url),
        ("Facebook", &info.facebook_url),
        ("Pinterest", &info.pinterest_url),
    ];
    for (network, url) in networks {
        if let Some(url) = present(url) {
            for selector in selectors::social_links(network) {
                page.set_attr(&selector, "href", Some(url));
            }
        }
    }
}

pub fn hydrate_site_settings(page: &mut Page, settings: &SiteSettings) {
    page.set_text(FOOTER_DESCRIPTION, present(&settings.footer_description));
    page.set_text(FORM_NOTE, present(&settings.form_response_note));
}

/// Applies every collection present in `content`; returns the names of the
/// collections that were applied.
pub fn apply(content: &SiteContent, page: &mut Page) -> Vec<&'static str> {
    let mut applied = Vec::new();

    if let Some(hero) = content.hero() {
        hydrate_hero(page, hero);
        applied.push("heroSections");
    }
    if let Some(stats) = non_empty(&content.social_proof_stats) {
        if hydrate_social_proof(page, stats) {
            applied.push("socialProofStats");
        }
    }
    if let Some(section) = content.why_staging() {
        hydrate_why_staging(page, section);
        applied.push("whyStagingSections");
    }
    if let Some(services) = non_empty(&content.services) {
        if hydrate_services(page, services) {
            applied.push("services");
        }
    }
    if let Some(items) = non_empty(&content.portfolio_items) {
        if hydrate_portfolio(page, items) {
            applied.push("portfolioItems");
        }
    }
    if let Some(section) = content.results() {
        hydrate_results_heading(page, section);
        applied.push("resultsSections");
    }
    if let Some(stats) = non_empty(&content.result_stats) {
        if hydrate_result_stats(page, stats) {
            applied.push("resultStats");
        }
    }
    if let Some(steps) = non_empty(&content.how_it_works_steps) {
        if hydrate_how_it_works(page, steps) {
            applied.push("howItWorksSteps");
        }
    }
    if let Some(testimonials) = non_empty(&content.testimonials) {
        if hydrate_testimonials(page, testimonials) {
            applied.push("testimonials");
        }
    }
    if let Some(section) = content.about() {
        hydrate_about(page, section);
        applied.push("aboutSections");
    }
    if let Some(areas) = non_empty(&content.service_areas) {
        if hydrate_service_areas(page, areas) {
            applied.push("serviceAreas");
        }
    }
    if let Some(faqs) = non_empty(&content.faqs) {
        if hydrate_faqs(page, faqs) {
            applied.push("faqs");
        }
    }
    if let Some(info) = content.contact() {
        hydrate_contact(page, info);
        applied.push("contactInfos");
    }
    if let Some(settings) = content.site_settings() {
        hydrate_site_settings(page, settings);
        applied.push("siteSettingsEntries");
    }

    applied
}
