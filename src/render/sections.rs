//! The Experience, Education and Skills sections.
//!
//! Each function returns `None` when its list is empty so the caller can omit the
//! section entirely.

use super::{Element, Palette};
use crate::document::{date_range, Education, Experience, Skill};

/// Group heading for skills whose category is blank.
const UNCATEGORISED: &str = "General";

fn section(name: &'static str, title: &str, palette: &Palette) -> Element {
    Element::new("section")
        .class("section")
        .attr("data-section", name)
        .child(
            Element::new("h2")
                .class("section-title")
                .style("border-color", palette.primary)
                .style("color", palette.primary)
                .style("font-family", palette.heading_font)
                .text(title),
        )
}

/// The title / subtitle / date row shared by experience and education entries.
fn entry_head(title: String, subtitle: String, dates: Option<String>, palette: &Palette) -> Element {
    let mut dates_el = Element::new("div")
        .class("entry-dates")
        .style("color", palette.text_secondary);
    if let Some(dates) = dates {
        dates_el = dates_el.text(dates);
    }

    Element::new("div")
        .class("entry-head")
        .child(
            Element::new("div")
                .child(
                    Element::new("h3")
                        .class("entry-title")
                        .style("color", palette.text_primary)
                        .text(title),
                )
                .child(
                    Element::new("div")
                        .class("entry-subtitle")
                        .style("color", palette.text_accent)
                        .text(subtitle),
                ),
        )
        .child(dates_el)
}

fn paragraph<S: ToString>(text: S, palette: &Palette) -> Element {
    Element::new("p")
        .class("entry-text")
        .style("color", palette.text_secondary)
        .text(text)
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() {
        placeholder
    } else {
        value
    }
}

pub(super) fn experience(entries: &[Experience], palette: &Palette) -> Option<Element> {
    if entries.is_empty() {
        return None;
    }

    let items = entries.iter().map(|exp| {
        let mut entry = Element::new("div")
            .class("entry")
            .attr("data-id", &exp.id)
            .child(entry_head(
                or_placeholder(&exp.position, "Position").to_string(),
                format!(
                    "{} - {}",
                    or_placeholder(&exp.company, "Company"),
                    or_placeholder(&exp.location, "Location")
                ),
                date_range(&exp.start_date, &exp.end_date, exp.current),
                palette,
            ));

        if !exp.description.is_empty() {
            entry = entry.child(paragraph(&exp.description, palette));
        }

        let bullets: Vec<Element> = exp
            .visible_achievements()
            .map(|a| Element::new("li").text(a))
            .collect();
        if !bullets.is_empty() {
            entry = entry.child(
                Element::new("ul")
                    .class("bullets")
                    .style("color", palette.text_secondary)
                    .children(bullets),
            );
        }

        entry
    });

    Some(section("experience", "Experience", palette).children(items))
}

pub(super) fn education(entries: &[Education], palette: &Palette) -> Option<Element> {
    if entries.is_empty() {
        return None;
    }

    let items = entries.iter().map(|edu| {
        let mut title = or_placeholder(&edu.degree, "Degree").to_string();
        if !edu.field.is_empty() {
            title.push_str(" in ");
            title.push_str(&edu.field);
        }

        let mut entry = Element::new("div")
            .class("entry")
            .attr("data-id", &edu.id)
            .child(entry_head(
                title,
                format!(
                    "{} - {}",
                    or_placeholder(&edu.institution, "Institution"),
                    or_placeholder(&edu.location, "Location")
                ),
                date_range(&edu.start_date, &edu.end_date, edu.current),
                palette,
            ));

        if !edu.gpa.is_empty() {
            entry = entry.child(paragraph(format!("GPA: {}", edu.gpa), palette));
        }
        if !edu.highlights.is_empty() {
            entry = entry.child(paragraph(&edu.highlights, palette));
        }

        entry
    });

    Some(section("education", "Education", palette).children(items))
}

/// Groups skills by category, keeping the order in which categories first appear.
fn group_by_category(skills: &[Skill]) -> Vec<(&str, Vec<&Skill>)> {
    let mut groups: Vec<(&str, Vec<&Skill>)> = Vec::new();
    for skill in skills {
        let category = or_placeholder(&skill.category, UNCATEGORISED);
        match groups.iter_mut().find(|(c, _)| *c == category) {
            Some((_, members)) => members.push(skill),
            None => groups.push((category, vec![skill])),
        }
    }
    groups
}

pub(super) fn skills(skills: &[Skill], palette: &Palette) -> Option<Element> {
    if skills.is_empty() {
        return None;
    }

    let groups = group_by_category(skills).into_iter().map(|(category, members)| {
        let chips = members.into_iter().map(|skill| {
            Element::new("span")
                .class("skill-chip")
                .attr("data-level", skill.level)
                .style("background-color", palette.background_accent)
                .style("color", palette.text_primary)
                .text(&skill.name)
        });

        Element::new("div")
            .class("skill-group")
            .child(
                Element::new("h3")
                    .class("skill-category")
                    .style("color", palette.text_primary)
                    .text(category),
            )
            .child(Element::new("div").class("skill-chips").children(chips))
    });

    Some(section("skills", "Skills", palette).children(groups))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{EducationBuilder, ExperienceBuilder, SkillType};
    use crate::themes::ThemeRegistry;

    fn palette() -> Palette<'static> {
        Palette::new(ThemeRegistry::builtin().resolve("modern"))
    }

    fn skill(name: &str, category: &str) -> Skill {
        Skill {
            id: name.to_string(),
            name: name.to_string(),
            level: 3,
            category: category.to_string(),
            kind: SkillType::Technical,
        }
    }

    #[test]
    fn current_entry_shows_present_instead_of_stale_end_date() {
        let exp = ExperienceBuilder::default()
            .company("Acme")
            .start_date("2019-04")
            .end_date("2020-01")
            .current(true)
            .build()
            .unwrap();
        let section = experience(&[exp], &palette()).expect("section renders");
        let dates = section
            .find(|e| e.has_class("entry-dates"))
            .expect("has dates");
        assert_eq!(dates.text_content(), "Apr 2019 - Present");
    }

    #[test]
    fn uses_placeholders_for_missing_fields() {
        let exp = ExperienceBuilder::default().build().unwrap();
        let section = experience(&[exp], &palette()).unwrap();
        assert!(section.text_content().contains("Position"));
        assert!(section.text_content().contains("Company - Location"));
        // no start date, no range
        let dates = section.find(|e| e.has_class("entry-dates")).unwrap();
        assert!(dates.text_content().is_empty());
    }

    #[test]
    fn only_non_blank_bullets_render() {
        let exp = ExperienceBuilder::default()
            .achievement("Cut costs by 20%")
            .achievement("   ")
            .achievement("Hired four engineers")
            .build()
            .unwrap();
        let section = experience(&[exp], &palette()).unwrap();
        let bullets = section.find_all(|e| e.tag == "li");
        assert_eq!(bullets.len(), 2);
        assert_eq!(bullets[1].text_content(), "Hired four engineers");
    }

    #[test]
    fn sole_blank_bullet_renders_no_list() {
        let exp = ExperienceBuilder::default().build().unwrap();
        assert_eq!(exp.achievements, vec![String::new()]);
        let section = experience(&[exp], &palette()).unwrap();
        assert!(section.find(|e| e.tag == "ul").is_none());
    }

    #[test]
    fn education_entry_combines_degree_and_field() {
        let edu = EducationBuilder::default()
            .degree("BSc")
            .field("Computer Science")
            .institution("Waterloo")
            .gpa("3.9")
            .start_date("2010-09")
            .build()
            .unwrap();
        let section = education(&[edu], &palette()).unwrap();
        let title = section.find(|e| e.has_class("entry-title")).unwrap();
        assert_eq!(title.text_content(), "BSc in Computer Science");
        assert!(section.text_content().contains("GPA: 3.9"));
        assert!(section.text_content().contains("Sep 2010 - End Date"));
    }

    #[test]
    fn skills_group_by_category_in_first_appearance_order() {
        let skills_list = vec![
            skill("Rust", "Programming Languages"),
            skill("Figma", ""),
            skill("Go", "Programming Languages"),
        ];
        let groups = group_by_category(&skills_list);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "Programming Languages");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, "General");

        let section = skills(&skills_list, &palette()).unwrap();
        let chips = section.find_all(|e| e.has_class("skill-chip"));
        assert_eq!(chips.len(), 3);
        assert_eq!(chips[0].get_style("background-color"), Some("#f0f9ff"));
    }

    #[test]
    fn empty_lists_render_nothing() {
        assert!(experience(&[], &palette()).is_none());
        assert!(education(&[], &palette()).is_none());
        assert!(skills(&[], &palette()).is_none());
    }
}
