use crate::config::CONFIG_FILE;
use crate::document::SkillType;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generates a resume-builder.toml config file
    Config,
    /// Renders the resume to a standalone HTML page
    Render {
        /// Write the page here instead of to stdout
        #[clap(short, long)]
        out: Option<PathBuf>,
        /// Render with this theme without changing the saved choice
        #[clap(short, long)]
        theme: Option<String>,
    },
    /// Exports the resume as a paginated PDF
    Export {
        /// Use a pre-rendered PNG instead of running the rasteriser
        #[clap(long)]
        image: Option<PathBuf>,
        /// Output path (defaults to the sanitised full name in the configured outdir)
        #[clap(short, long)]
        out: Option<PathBuf>,
        /// Build the PDF but don't write it
        #[clap(long)]
        dry_run: bool,
    },
    /// Lists the available themes
    Themes,
    /// Selects the theme used for rendering and export
    Theme {
        /// Theme name; unknown names fall back to `modern`
        name: String,
    },
    /// Shows or hides the preview
    Preview {
        #[clap(subcommand)]
        action: PreviewAction,
    },
    /// Replaces the saved resume with a JSON document
    Import {
        /// A resume in the saved JSON format
        path: PathBuf,
    },
    /// Adds, edits and removes work experience entries
    Experience {
        #[clap(subcommand)]
        action: ExperienceAction,
    },
    /// Adds, edits and removes education entries
    Education {
        #[clap(subcommand)]
        action: EducationAction,
    },
    /// Adds and removes skills
    Skill {
        #[clap(subcommand)]
        action: SkillAction,
    },
    /// Manages the skill categories offered for each skill type
    Category {
        #[clap(subcommand)]
        action: CategoryAction,
    },
    /// Resets the resume to the empty template
    Reset {
        /// Don't ask for confirmation
        #[clap(short, long)]
        yes: bool,
    },
    /// Summarises the saved resume
    Status,
}

#[derive(Subcommand, Debug)]
pub enum PreviewAction {
    Show,
    Hide,
}

/// Fields shared by `experience add` and `experience edit`. Omitted fields are left
/// as they are.
#[derive(Args, Debug, Default, Clone, PartialEq, Eq)]
pub struct ExperienceFields {
    #[clap(long)]
    pub company: Option<String>,
    #[clap(long)]
    pub position: Option<String>,
    #[clap(long)]
    pub location: Option<String>,
    /// Start month, as YYYY-MM
    #[clap(long)]
    pub start: Option<String>,
    /// End month, as YYYY-MM
    #[clap(long)]
    pub end: Option<String>,
    #[clap(long)]
    pub description: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ExperienceAction {
    /// Adds an entry and prints its id
    Add {
        #[clap(flatten)]
        fields: ExperienceFields,
        /// Mark this as a current position
        #[clap(long)]
        current: bool,
        /// An achievement bullet; repeat for several
        #[clap(long = "achievement")]
        achievements: Vec<String>,
    },
    /// Changes the given fields of an entry
    Edit {
        /// Entry id, or an unambiguous prefix of it
        id: String,
        #[clap(flatten)]
        fields: ExperienceFields,
    },
    /// Removes an entry
    Remove { id: String },
    /// Toggles whether an entry is a current position
    Current { id: String },
    /// Appends an achievement bullet
    AddBullet { id: String, text: Option<String> },
    /// Rewrites an achievement bullet, numbered from 1
    SetBullet {
        id: String,
        number: usize,
        text: String,
    },
    /// Removes an achievement bullet; an entry always keeps at least one
    RemoveBullet { id: String, number: usize },
}

/// Fields shared by `education add` and `education edit`.
#[derive(Args, Debug, Default, Clone, PartialEq, Eq)]
pub struct EducationFields {
    #[clap(long)]
    pub institution: Option<String>,
    #[clap(long)]
    pub degree: Option<String>,
    /// Field of study
    #[clap(long)]
    pub field: Option<String>,
    #[clap(long)]
    pub location: Option<String>,
    /// Start month, as YYYY-MM
    #[clap(long)]
    pub start: Option<String>,
    /// End month, as YYYY-MM
    #[clap(long)]
    pub end: Option<String>,
    #[clap(long)]
    pub gpa: Option<String>,
    #[clap(long)]
    pub highlights: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum EducationAction {
    /// Adds an entry and prints its id
    Add {
        #[clap(flatten)]
        fields: EducationFields,
        /// Still studying here
        #[clap(long)]
        current: bool,
    },
    /// Changes the given fields of an entry
    Edit {
        /// Entry id, or an unambiguous prefix of it
        id: String,
        #[clap(flatten)]
        fields: EducationFields,
    },
    /// Removes an entry
    Remove { id: String },
    /// Toggles whether an entry is ongoing
    Current { id: String },
}

#[derive(Subcommand, Debug)]
pub enum SkillAction {
    /// Adds a skill and prints its id
    Add {
        kind: SkillKind,
        name: String,
        /// One of the categories offered for this skill type
        #[clap(long)]
        category: String,
        /// Proficiency from 1 to 5
        #[clap(long, default_value_t = 3)]
        level: u8,
    },
    /// Removes a skill
    Remove { id: String },
}

#[derive(Subcommand, Debug)]
pub enum CategoryAction {
    /// Adds a category
    Add { kind: SkillKind, name: String },
    /// Removes a category; skills in it keep their place but lose the category
    Remove { kind: SkillKind, name: String },
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum SkillKind {
    Technical,
    Soft,
}

impl From<SkillKind> for SkillType {
    fn from(kind: SkillKind) -> Self {
        match kind {
            SkillKind::Technical => SkillType::Technical,
            SkillKind::Soft => SkillType::Soft,
        }
    }
}

#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub struct Cli {
    /// Path to the configuration file
    #[clap(short, long, global = true, default_value = CONFIG_FILE)]
    pub config: PathBuf,
    /// More logging (-v debug, -vv trace); RUST_LOG overrides
    #[clap(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
    #[clap(subcommand)]
    pub command: Commands,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_export_flags() {
        let cli = Cli::try_parse_from([
            "resume-builder",
            "export",
            "--image",
            "page.png",
            "--dry-run",
            "-v",
        ])
        .expect("can parse");
        assert_eq!(cli.verbose, 1);
        assert_eq!(cli.config, PathBuf::from(CONFIG_FILE));
        match cli.command {
            Commands::Export {
                image,
                out,
                dry_run,
            } => {
                assert_eq!(image, Some(PathBuf::from("page.png")));
                assert_eq!(out, None);
                assert!(dry_run);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn parses_category_commands() {
        let cli = Cli::try_parse_from(["resume-builder", "category", "add", "soft", "Mentoring"])
            .expect("can parse");
        match cli.command {
            Commands::Category {
                action: CategoryAction::Add { kind, name },
            } => {
                assert_eq!(SkillType::from(kind), SkillType::Soft);
                assert_eq!(name, "Mentoring");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn parses_experience_commands() {
        let cli = Cli::try_parse_from([
            "resume-builder",
            "experience",
            "add",
            "--company",
            "Initech",
            "--start",
            "2020-01",
            "--current",
            "--achievement",
            "Fixed the Y2K bug",
            "--achievement",
            "Moved the stapler",
        ])
        .expect("can parse");
        match cli.command {
            Commands::Experience {
                action:
                    ExperienceAction::Add {
                        fields,
                        current,
                        achievements,
                    },
            } => {
                assert_eq!(fields.company.as_deref(), Some("Initech"));
                assert_eq!(fields.start.as_deref(), Some("2020-01"));
                assert_eq!(fields.position, None);
                assert!(current);
                assert_eq!(achievements.len(), 2);
            }
            other => panic!("unexpected command {other:?}"),
        }

        let cli = Cli::try_parse_from(["resume-builder", "experience", "set-bullet", "ab12", "2", "Shipped"])
            .expect("can parse");
        assert!(matches!(
            cli.command,
            Commands::Experience {
                action: ExperienceAction::SetBullet { number: 2, .. }
            }
        ));
    }

    #[test]
    fn parses_skill_commands() {
        let cli = Cli::try_parse_from([
            "resume-builder",
            "skill",
            "add",
            "technical",
            "Rust",
            "--category",
            "Programming Languages",
        ])
        .expect("can parse");
        match cli.command {
            Commands::Skill {
                action:
                    SkillAction::Add {
                        kind,
                        name,
                        category,
                        level,
                    },
            } => {
                assert_eq!(kind, SkillKind::Technical);
                assert_eq!(name, "Rust");
                assert_eq!(category, "Programming Languages");
                assert_eq!(level, 3);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
