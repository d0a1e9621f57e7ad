//! Command-line interface definitions.
//!
//! Every subcommand assembles a different set of input slots and then goes
//! through the same generation call. Input references accept local paths,
//! `http(s)://` URLs, and `s3://bucket/key` object paths.

use crate::models::AspectRatio;
use clap::{Parser, Subcommand};

const RESTORE_PROMPT: &str = "Restore this photograph: enhance colors, improve details and sharpness, and remove defects like scratches or fading.";
const SKETCH_PROMPT: &str = "Flesh out this sketch into a detailed color image.";

#[derive(Debug, Parser)]
#[command(name = "aiphoto")]
#[command(about = "CLI tool for Gemini image generation and editing")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

fn parse_aspect_ratio(input: &str) -> std::result::Result<AspectRatio, String> {
    input.parse()
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Text-to-image generation.
    Generate {
        /// Path to save the generated image.
        output_file: String,
        /// Text prompt for image generation.
        #[arg(short, long)]
        prompt: String,
        /// Output aspect ratio.
        #[arg(long, value_parser = parse_aspect_ratio, default_value_t = AspectRatio::default())]
        aspect_ratio: AspectRatio,
    },

    /// General mask-free image editing (add/remove/move objects, change backgrounds).
    Edit {
        /// Image to edit (path, URL, or s3:// reference).
        input_file: String,
        /// Path to save the edited image.
        output_file: String,
        /// Text prompt describing the edit.
        #[arg(short, long)]
        prompt: String,
        /// Output aspect ratio.
        #[arg(long, value_parser = parse_aspect_ratio, default_value_t = AspectRatio::default())]
        aspect_ratio: AspectRatio,
    },

    /// Restore and enhance old or damaged photos.
    Restore {
        /// Old image to restore.
        input_file: String,
        /// Path to save the restored image.
        output_file: String,
        /// Prompt for restoration guidance.
        #[arg(short, long, default_value = RESTORE_PROMPT)]
        prompt: String,
        /// Output aspect ratio.
        #[arg(long, value_parser = parse_aspect_ratio, default_value_t = AspectRatio::default())]
        aspect_ratio: AspectRatio,
    },

    /// Apply a new style to an image.
    #[command(name = "style_transfer", alias = "style-transfer")]
    StyleTransfer {
        /// Content image.
        input_file: String,
        /// Path to save the stylized image.
        output_file: String,
        /// Prompt describing the desired style or how to use the reference.
        #[arg(short, long)]
        prompt: String,
        /// Optional image to use as style reference.
        #[arg(long = "style_ref_image", alias = "style-ref-image")]
        style_ref_image: Option<String>,
        /// Output aspect ratio.
        #[arg(long, value_parser = parse_aspect_ratio, default_value_t = AspectRatio::default())]
        aspect_ratio: AspectRatio,
    },

    /// Combine elements from up to 3 reference images and text.
    Compose {
        /// Path to save the composed image.
        output_file: String,
        /// Prompt describing how to combine the images.
        #[arg(short, long)]
        prompt: String,
        /// First input image.
        #[arg(long = "input_file1", alias = "input-file1")]
        input_file1: Option<String>,
        /// Second input image.
        #[arg(long = "input_file2", alias = "input-file2")]
        input_file2: Option<String>,
        /// Third input image.
        #[arg(long = "input_file3", alias = "input-file3")]
        input_file3: Option<String>,
        /// Output aspect ratio.
        #[arg(long, value_parser = parse_aspect_ratio, default_value_t = AspectRatio::default())]
        aspect_ratio: AspectRatio,
    },

    /// Render text on an image.
    #[command(name = "add_text", alias = "add-text")]
    AddText {
        /// Image to annotate.
        input_file: String,
        /// Path to save the image with text.
        output_file: String,
        /// Prompt describing the text and its placement.
        #[arg(short, long)]
        prompt: String,
        /// Output aspect ratio.
        #[arg(long, value_parser = parse_aspect_ratio, default_value_t = AspectRatio::default())]
        aspect_ratio: AspectRatio,
    },

    /// Generate a detailed image from a sketch.
    #[command(name = "sketch_to_image", alias = "sketch-to-image")]
    SketchToImage {
        /// Sketch image.
        input_file: String,
        /// Path to save the generated image.
        output_file: String,
        /// Optional prompt to guide generation.
        #[arg(short, long, default_value = SKETCH_PROMPT)]
        prompt: String,
        /// Output aspect ratio.
        #[arg(long, value_parser = parse_aspect_ratio, default_value_t = AspectRatio::default())]
        aspect_ratio: AspectRatio,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_defaults_to_widescreen() {
        let cli = Cli::try_parse_from(["aiphoto", "generate", "out.png", "-p", "a castle"])
            .unwrap();

        match cli.command {
            Command::Generate {
                output_file,
                prompt,
                aspect_ratio,
            } => {
                assert_eq!(output_file, "out.png");
                assert_eq!(prompt, "a castle");
                assert_eq!(aspect_ratio, AspectRatio::Widescreen);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_invalid_aspect_ratio_is_rejected_at_parse_time() {
        let err = Cli::try_parse_from([
            "aiphoto",
            "generate",
            "out.png",
            "-p",
            "a castle",
            "--aspect-ratio",
            "7:5",
        ])
        .unwrap_err();

        assert!(err.to_string().contains("Invalid aspect ratio"));
    }

    #[test]
    fn test_compose_slots_are_individually_optional() {
        let cli = Cli::try_parse_from([
            "aiphoto",
            "compose",
            "out.png",
            "-p",
            "merge",
            "--input_file2",
            "b.png",
        ])
        .unwrap();

        match cli.command {
            Command::Compose {
                input_file1,
                input_file2,
                input_file3,
                ..
            } => {
                assert_eq!(input_file1, None);
                assert_eq!(input_file2, Some("b.png".to_string()));
                assert_eq!(input_file3, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_restore_has_default_prompt() {
        let cli = Cli::try_parse_from(["aiphoto", "restore", "old.jpg", "new.jpg"]).unwrap();

        match cli.command {
            Command::Restore { prompt, .. } => {
                assert!(prompt.starts_with("Restore this photograph"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_snake_and_kebab_subcommand_spellings() {
        for name in ["sketch_to_image", "sketch-to-image"] {
            let cli =
                Cli::try_parse_from(["aiphoto", name, "sketch.png", "out.png"]).unwrap();
            assert!(matches!(cli.command, Command::SketchToImage { .. }));
        }
    }

    #[test]
    fn test_missing_required_prompt_is_rejected() {
        assert!(Cli::try_parse_from(["aiphoto", "edit", "in.png", "out.png"]).is_err());
    }
}
