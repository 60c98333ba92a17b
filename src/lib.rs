//! # Blokmat - Block Program Engine for Math Education
//!
//! **Blokmat** turns a block workspace built in a visual math editor into a runnable
//! program, executes it in a sandbox and routes what it produced to a text console and a
//! drawing surface. Block vocabularies are split into four education levels (genel,
//! ilkokul, ortaokul, lise), each with its own catalog of blocks.
//!
//! ## Core Workflow
//!
//! 1.  **Build a Workspace**: Assemble [`workspace::Block`] trees in code or load the editor's
//!     XML with [`workspace::Workspace::from_xml`].
//! 2.  **Compile**: A [`compiler::Compiler`] for the chosen [`catalog::Level`] walks every top
//!     block and assembles a [`ast::Program`]. Custom blocks are registered through
//!     [`compiler::Compiler::builder`].
//! 3.  **Execute**: The [`interpreter::Executor`] runs the program against a
//!     [`interpreter::Bindings`] implementation and returns the console lines.
//! 4.  **Route and Render**: The [`output::OutputRouter`] keeps the console text and the
//!     last drawing request, which [`render::render`] paints on any
//!     [`render::DrawingSurface`].
//!
//! The [`editor::Editor`] facade wires all of this together.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use blokmat::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut editor = Editor::new(EditorConfig::default().with_starter_blocks(false));
//!
//!     // "Merhaba" is printed, then a circle of radius 60 is drawn with its area.
//!     editor.workspace_mut().add_block(
//!         Block::new("text_print")
//!             .with_value("TEXT", Block::text("Merhaba"))
//!             .then(Block::new("daire_ciz_hesapla").with_value("YARICAP", Block::number(60.0))),
//!     );
//!
//!     println!("{}", editor.generate_code()?);
//!     for line in editor.run()? {
//!         println!("{}", line);
//!     }
//!
//!     if let Some(svg) = editor.render_svg()? {
//!         std::fs::write("drawing.svg", svg)?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod ast;
pub mod catalog;
pub mod compiler;
pub mod config;
pub mod editor;
pub mod error;
pub mod interpreter;
pub mod output;
pub mod prelude;
pub mod render;
pub mod workspace;
