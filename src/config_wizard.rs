//! Interactive configuration wizard for creating `resume-builder.toml`.
//!
//! The wizard walks through where the resume is stored, how pages are laid out and
//! how the resume gets rasterised, then writes the answers to the config file.

use crate::config::{Configuration, CONFIG_FILE};
use anyhow::{Context, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, FuzzySelect, Input};
use std::path::PathBuf;

/// Paper sizes offered by the wizard, in millimetres.
const PAGE_SIZES: &[(&str, f32, f32)] = &[
    ("A4 (210 x 297 mm)", 210.0, 297.0),
    ("US Letter (216 x 279 mm)", 215.9, 279.4),
    ("A5 (148 x 210 mm)", 148.0, 210.0),
];

/// Run the interactive configuration wizard.
pub fn run() -> Result<()> {
    let theme = ColorfulTheme {
        ..ColorfulTheme::default()
    };
    let mut config = Configuration::default();

    let store_path: String = Input::with_theme(&theme)
        .with_prompt("Where should the resume be saved?")
        .default(config.store.path.display().to_string())
        .interact()
        .with_context(|| "Failed to obtain store path")?;
    config.store.path = PathBuf::from(store_path);

    let page_labels: Vec<&str> = PAGE_SIZES.iter().map(|(label, _, _)| *label).collect();
    let page_idx = FuzzySelect::with_theme(&theme)
        .with_prompt("Page size")
        .items(&page_labels)
        .default(0)
        .interact()?;
    let (_, page_width, page_height) = PAGE_SIZES[page_idx];
    config.export.page_width_mm = page_width;
    config.export.page_height_mm = page_height;

    let margin: f32 = Input::with_theme(&theme)
        .with_prompt("Page margin in millimetres (all sides)")
        .default(config.export.margin_top_mm)
        .validate_with(|input: &f32| {
            if *input >= 0.0 && *input * 2.0 < page_width.min(page_height) {
                Ok(())
            } else {
                Err("Margins must leave room for content")
            }
        })
        .interact()?;
    config.export.margin_top_mm = margin;
    config.export.margin_right_mm = margin;
    config.export.margin_bottom_mm = margin;
    config.export.margin_left_mm = margin;

    config.export.pixel_ratio = Input::with_theme(&theme)
        .with_prompt("Raster pixel ratio (higher is sharper and larger)")
        .default(config.export.pixel_ratio)
        .validate_with(|input: &f32| {
            if *input > 0.0 {
                Ok(())
            } else {
                Err("Pixel ratio must be positive")
            }
        })
        .interact()?;

    let outdir: String = Input::with_theme(&theme)
        .with_prompt("Directory to write PDFs into")
        .default(config.export.outdir.display().to_string())
        .interact()?;
    config.export.outdir = PathBuf::from(outdir);

    if Confirm::with_theme(&theme)
        .with_prompt("Limit the number of pages a resume may span?")
        .default(false)
        .interact()?
    {
        let max_pages: usize = Input::with_theme(&theme)
            .with_prompt("Maximum pages")
            .default(2)
            .validate_with(|input: &usize| {
                if *input > 0 {
                    Ok(())
                } else {
                    Err("Must allow at least one page")
                }
            })
            .interact()?;
        config.export.max_pages = Some(max_pages);
    }

    config.export.clip_margins = Confirm::with_theme(&theme)
        .with_prompt("Keep the resume out of the page margins when it spans pages?")
        .default(false)
        .interact()?;

    let command: String = Input::with_theme(&theme)
        .with_prompt("Rasteriser command ({input}, {output} and {scale} are substituted)")
        .default(config.rasterizer.command.join(" "))
        .interact()?;
    config.rasterizer.command = command.split_whitespace().map(ToString::to_string).collect();

    if Confirm::with_theme(&theme)
        .with_prompt("Do you have a directory of custom themes?")
        .default(false)
        .interact()?
    {
        let dir: String = Input::with_theme(&theme)
            .with_prompt("Custom theme directory")
            .default("themes".to_string())
            .interact()?;
        config.themes.dir = Some(PathBuf::from(dir));
    }

    let contents = config.to_toml()?;

    let config_path = PathBuf::from(CONFIG_FILE);
    if config_path.exists()
        && !Confirm::with_theme(&theme)
            .with_prompt(format!("{CONFIG_FILE} already exists, do you want to override it?"))
            .interact()?
    {
        println!("Configuration:");
        println!("{}", contents);
    } else {
        std::fs::write(&config_path, contents)
            .with_context(|| "Failed to write configuration file")?;
        println!("{CONFIG_FILE} written!");
    }

    Ok(())
}
