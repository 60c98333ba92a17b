//! The editor session: one workspace, one level, the last run's output and drawing.

use crate::ast::Program;
use crate::catalog::Level;
use crate::compiler::Compiler;
use crate::config::EditorConfig;
use crate::error::{CompileError, RenderError, WorkspaceError};
use crate::interpreter::Executor;
use crate::output::{OutputRouter, Visualization};
use crate::render::{self, DrawingSurface, SvgSurface};
use crate::workspace::Workspace;
use log::info;

/// Ties the pipeline together: workspace → compiler → executor → output router → renderer.
pub struct Editor {
    config: EditorConfig,
    compiler: Compiler,
    workspace: Workspace,
    executor: Executor,
    router: OutputRouter,
    code: Option<String>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        let compiler = Compiler::new(config.level);
        let workspace = fresh_workspace(&config, config.level);
        Self {
            config,
            compiler,
            workspace,
            executor: Executor::new(),
            router: OutputRouter::new(),
            code: None,
        }
    }

    /// An editor that uses `compiler` instead of the level's default one.
    pub fn with_compiler(config: EditorConfig, compiler: Compiler) -> Self {
        let config = config.with_level(compiler.level());
        let mut editor = Self::new(config);
        editor.compiler = compiler;
        editor
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn level(&self) -> Level {
        self.compiler.level()
    }

    /// Switches to another level. The workspace starts over and all output is cleared.
    pub fn set_level(&mut self, level: Level) {
        info!("Switching editor level to '{}'", level);
        self.config.level = level;
        self.compiler = Compiler::new(level);
        self.workspace = fresh_workspace(&self.config, level);
        self.router.clear();
        self.code = None;
    }

    pub fn compiler(&self) -> &Compiler {
        &self.compiler
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn workspace_mut(&mut self) -> &mut Workspace {
        &mut self.workspace
    }

    /// Replaces the workspace.
    pub fn load_workspace(&mut self, workspace: Workspace) {
        self.workspace = workspace;
    }

    pub fn load_xml(&mut self, source: &str) -> Result<(), WorkspaceError> {
        self.workspace.load_xml(source)
    }

    pub fn save_xml(&self) -> Result<String, WorkspaceError> {
        self.workspace.to_xml()
    }

    /// Compiles the workspace and keeps its source text for display.
    pub fn generate_code(&mut self) -> Result<&str, CompileError> {
        self.compile_fresh()?;
        Ok(self.code.as_deref().unwrap_or_default())
    }

    /// Compiles and runs the workspace. The returned lines replace the previous output.
    pub fn run(&mut self) -> Result<&[String], CompileError> {
        let program = self.compile_fresh()?;
        Ok(self.router.route(&self.executor, &program))
    }

    fn compile_fresh(&mut self) -> Result<Program, CompileError> {
        let program = self.compiler.compile(&self.workspace)?;
        let code = program.to_string();
        if self.config.echo_code {
            info!("Generated code:\n{}", code);
        }
        self.code = Some(code);
        Ok(program)
    }

    /// Empties the workspace and forgets output, code and drawing.
    pub fn clear(&mut self) {
        self.workspace.clear();
        self.router.clear();
        self.code = None;
    }

    pub fn output(&self) -> &[String] {
        self.router.lines()
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn visualization(&self) -> Option<&Visualization> {
        self.router.visualization()
    }

    /// Draws the current visualization at the configured size. Returns false when there is none.
    pub fn render(&self, surface: &mut dyn DrawingSurface) -> bool {
        let Some(visualization) = self.router.visualization() else {
            return false;
        };
        render::render(
            visualization,
            surface,
            self.config.surface_width,
            self.config.surface_height,
        );
        true
    }

    /// The current visualization as an SVG document, if there is one.
    pub fn render_svg(&self) -> Result<Option<String>, RenderError> {
        let mut surface = SvgSurface::new(self.config.surface_width, self.config.surface_height);
        if !self.render(&mut surface) {
            return Ok(None);
        }
        surface.to_svg().map(Some)
    }
}

fn fresh_workspace(config: &EditorConfig, level: Level) -> Workspace {
    if config.starter_blocks {
        Workspace::starter(level)
    } else {
        Workspace::new()
    }
}
