//! Application orchestration: slot layout per subcommand, assembly,
//! generation, and output handling.

use crate::api::{GeminiGenerator, GenerationService};
use crate::cli::Command;
use crate::content::{self, Slot};
use crate::locator::{expand_home, ImageSource, Resolver};
use crate::models::{AspectRatio, GenerationOptions};
use crate::output::{self, Handled};
use crate::Result;
use tracing::info;

/// Coordinates reference resolution, request assembly, and the API call.
pub struct App {
    source: Box<dyn ImageSource>,
    generator: Box<dyn GenerationService>,
}

/// Injectable service bundle used to construct [`App`] in tests/harnesses.
pub struct AppServices {
    pub source: Box<dyn ImageSource>,
    pub generator: Box<dyn GenerationService>,
}

/// A subcommand reduced to its input slots and settings.
struct Invocation {
    mode: &'static str,
    slots: Vec<Slot>,
    prompt: String,
    require_image: bool,
    output_file: String,
    aspect_ratio: AspectRatio,
}

impl From<Command> for Invocation {
    fn from(command: Command) -> Self {
        match command {
            Command::Generate {
                output_file,
                prompt,
                aspect_ratio,
            } => Invocation {
                mode: "Text-to-Image Generation",
                slots: vec![],
                prompt,
                require_image: false,
                output_file,
                aspect_ratio,
            },
            Command::Edit {
                input_file,
                output_file,
                prompt,
                aspect_ratio,
            } => Invocation {
                mode: "Image Editing",
                slots: vec![Slot::filled("input_file", input_file)],
                prompt,
                require_image: false,
                output_file,
                aspect_ratio,
            },
            Command::Restore {
                input_file,
                output_file,
                prompt,
                aspect_ratio,
            } => Invocation {
                mode: "Photo Restoration",
                slots: vec![Slot::filled("input_file", input_file)],
                prompt,
                require_image: false,
                output_file,
                aspect_ratio,
            },
            Command::StyleTransfer {
                input_file,
                output_file,
                prompt,
                style_ref_image,
                aspect_ratio,
            } => Invocation {
                mode: "Style Transfer",
                slots: vec![
                    Slot::filled("input_file", input_file),
                    Slot::maybe("style_ref_image", style_ref_image),
                ],
                prompt,
                require_image: false,
                output_file,
                aspect_ratio,
            },
            Command::Compose {
                output_file,
                prompt,
                input_file1,
                input_file2,
                input_file3,
                aspect_ratio,
            } => Invocation {
                mode: "Creative Composition",
                slots: vec![
                    Slot::maybe("input_file1", input_file1),
                    Slot::maybe("input_file2", input_file2),
                    Slot::maybe("input_file3", input_file3),
                ],
                prompt,
                require_image: true,
                output_file,
                aspect_ratio,
            },
            Command::AddText {
                input_file,
                output_file,
                prompt,
                aspect_ratio,
            } => Invocation {
                mode: "Add Text to Image",
                slots: vec![Slot::filled("input_file", input_file)],
                prompt,
                require_image: false,
                output_file,
                aspect_ratio,
            },
            Command::SketchToImage {
                input_file,
                output_file,
                prompt,
                aspect_ratio,
            } => Invocation {
                mode: "Sketch to Image",
                slots: vec![Slot::filled("input_file", input_file)],
                prompt,
                require_image: false,
                output_file,
                aspect_ratio,
            },
        }
    }
}

impl App {
    /// Build an app from concrete service dependencies.
    ///
    /// This is primarily useful for integration tests and local harnesses
    /// that need to inject mocks.
    pub fn with_services(services: AppServices) -> Self {
        Self {
            source: services.source,
            generator: services.generator,
        }
    }

    /// Construct the app once per process: client initialization (with its
    /// own retry) happens here, before any input is touched.
    pub async fn new() -> Result<Self> {
        let generator = GeminiGenerator::new().await?;
        let source = Resolver::new()?;

        Ok(Self::with_services(AppServices {
            source: Box::new(source),
            generator: Box::new(generator),
        }))
    }

    /// Run one subcommand to completion and report what it produced.
    pub async fn run(&self, command: Command) -> Result<Handled> {
        let invocation = Invocation::from(command);
        info!("Mode: {}", invocation.mode);

        let parts = content::assemble(
            self.source.as_ref(),
            &invocation.slots,
            &invocation.prompt,
            invocation.require_image,
        )
        .await?;

        let options = GenerationOptions::new(invocation.aspect_ratio);
        let response = self.generator.generate(&parts, &options).await?;

        let output_path = expand_home(&invocation.output_file);
        output::handle(&response, &output_path)
    }
}
