//! The header block: picture, name, title, contact methods and summary.

use super::{Element, Palette};
use crate::document::PersonalInfo;

pub(super) fn render(info: &PersonalInfo, palette: &Palette) -> Element {
    let mut header = Element::new("header")
        .class("resume-header")
        .style("border-color", palette.primary);

    if !info.profile_picture.is_empty() {
        header = header.child(
            Element::new("img")
                .class("profile-picture")
                .attr("src", &info.profile_picture)
                .attr("alt", "Profile")
                .style("border-color", palette.primary),
        );
    }

    header = header
        .child(
            Element::new("h1")
                .class("name")
                .style("color", palette.primary)
                .style("font-family", palette.heading_font)
                .text(or_placeholder(&info.full_name, "Your Name")),
        )
        .child(
            Element::new("h2")
                .class("job-title")
                .style("color", palette.text_accent)
                .text(or_placeholder(&info.job_title, "Professional Title")),
        );

    // email, phone and location on the first row
    let mut contacts = Vec::new();
    if !info.email.is_empty() {
        contacts.push(link(format!("mailto:{}", info.email), &info.email, palette));
    }
    if !info.phone.is_empty() {
        contacts.push(link(format!("tel:{}", info.phone), &info.phone, palette));
    }
    if !info.location.is_empty() {
        contacts.push(Element::new("span").class("contact").text(&info.location));
    }
    if !contacts.is_empty() {
        header = header.child(
            Element::new("div")
                .class("contact-row")
                .style("color", palette.text_secondary)
                .children(contacts),
        );
    }

    // profile links on the second row
    let mut links = Vec::new();
    if !info.website.is_empty() {
        links.push(link(&info.website, "Portfolio", palette));
    }
    if !info.linkedin.is_empty() {
        links.push(link(&info.linkedin, "LinkedIn", palette));
    }
    if !info.github.is_empty() {
        links.push(link(&info.github, "GitHub", palette));
    }
    if !links.is_empty() {
        header = header.child(Element::new("div").class("contact-row").children(links));
    }

    if !info.summary.is_empty() {
        header = header.child(
            Element::new("p")
                .class("summary")
                .style("color", palette.text_secondary)
                .text(&info.summary),
        );
    }

    header
}

fn link<H: ToString, T: ToString>(href: H, text: T, palette: &Palette) -> Element {
    Element::new("a")
        .class("contact")
        .attr("href", href)
        .style("color", palette.text_accent)
        .text(text)
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() {
        placeholder
    } else {
        value
    }
}
