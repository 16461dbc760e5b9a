//! Shader description files
//!
//! A description file holds both pipeline stages as WGSL, separated by
//! marker lines:
//!
//! ```text
//! #shader vertex
//! @vertex fn vs_main(...) -> ... { ... }
//!
//! #shader fragment
//! @fragment fn fs_main(...) -> ... { ... }
//! ```
//!
//! Each section is compiled as its own module, so it must declare every
//! type and binding it uses, plus the stage's entry point function. Text
//! before the first marker is ignored.

use std::{fmt, path::Path};

use crate::{error::ShaderError, wgpu_utils::capture_validation};

const STAGE_MARKER: &str = "#shader";

/// Entry point expected in the vertex section
pub const VERTEX_ENTRY_POINT: &str = "vs_main";
/// Entry point expected in the fragment section
pub const FRAGMENT_ENTRY_POINT: &str = "fs_main";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// WGSL source for each stage of the program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSources {
    /// Splits a description file's contents into stage sources.
    pub fn parse(source: &str) -> Result<Self, ShaderError> {
        let mut vertex: Option<String> = None;
        let mut fragment: Option<String> = None;
        let mut current: Option<ShaderStage> = None;

        for (line_number, line) in source.lines().enumerate() {
            if let Some(name) = stage_name(line) {
                let stage = match name {
                    "vertex" => ShaderStage::Vertex,
                    "fragment" | "pixel" => ShaderStage::Fragment,
                    _ => {
                        return Err(ShaderError::UnknownStage {
                            name: name.to_string(),
                            line: line_number + 1,
                        })
                    }
                };

                let slot = match stage {
                    ShaderStage::Vertex => &mut vertex,
                    ShaderStage::Fragment => &mut fragment,
                };
                if slot.is_some() {
                    return Err(ShaderError::DuplicateStage(stage));
                }
                *slot = Some(String::new());
                current = Some(stage);
                continue;
            }

            let target = match current {
                Some(ShaderStage::Vertex) => vertex.as_mut(),
                Some(ShaderStage::Fragment) => fragment.as_mut(),
                None => None,
            };
            if let Some(buffer) = target {
                buffer.push_str(line);
                buffer.push('\n');
            }
        }

        let sources = Self {
            vertex: vertex.ok_or(ShaderError::MissingStage(ShaderStage::Vertex))?,
            fragment: fragment.ok_or(ShaderError::MissingStage(ShaderStage::Fragment))?,
        };

        for (stage, source, entry_point) in [
            (ShaderStage::Vertex, &sources.vertex, VERTEX_ENTRY_POINT),
            (ShaderStage::Fragment, &sources.fragment, FRAGMENT_ENTRY_POINT),
        ] {
            if !declares_function(source, entry_point) {
                return Err(ShaderError::MissingEntryPoint { stage, entry_point });
            }
        }

        Ok(sources)
    }

    /// Reads and splits a shader description file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ShaderError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ShaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        log::debug!("loaded shader description {}", path.display());
        Self::parse(&contents)
    }
}

/// Stage name of a marker line, or `None` for an ordinary source line.
/// The marker must be followed by whitespace, so `#shaderfoo` is source.
fn stage_name(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix(STAGE_MARKER)?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}

fn declares_function(source: &str, name: &str) -> bool {
    let tokens: Vec<&str> = source
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| !token.is_empty())
        .collect();
    tokens.windows(2).any(|pair| pair[0] == "fn" && pair[1] == name)
}

/// Compiled shader modules for both stages.
pub struct ShaderProgram {
    pub vertex: wgpu::ShaderModule,
    pub fragment: wgpu::ShaderModule,
}

impl ShaderProgram {
    /// Compiles both stages, turning validation errors into [`ShaderError`]
    /// instead of letting the device's error handler panic.
    pub async fn compile(
        device: &wgpu::Device,
        sources: &ShaderSources,
    ) -> Result<Self, ShaderError> {
        Ok(Self {
            vertex: compile_stage(device, ShaderStage::Vertex, &sources.vertex).await?,
            fragment: compile_stage(device, ShaderStage::Fragment, &sources.fragment).await?,
        })
    }
}

async fn compile_stage(
    device: &wgpu::Device,
    stage: ShaderStage,
    source: &str,
) -> Result<wgpu::ShaderModule, ShaderError> {
    capture_validation(device, |device| {
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&format!("Torus {} shader", stage)),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        })
    })
    .await
    .map_err(|error| ShaderError::Compile {
        stage,
        message: error.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESCRIPTION: &str = "\
// shared header, ignored
#shader vertex
@vertex fn vs_main() -> @builtin(position) vec4<f32> { return vec4<f32>(0.0); }

#shader fragment
@fragment fn fs_main() -> @location(0) vec4<f32> { return vec4<f32>(1.0); }
";

    #[test]
    fn test_splits_sections() {
        let sources = ShaderSources::parse(DESCRIPTION).unwrap();

        assert!(sources.vertex.contains("vs_main"));
        assert!(!sources.vertex.contains("fs_main"));
        assert!(sources.fragment.contains("fs_main"));
        assert!(!sources.fragment.contains("ignored"));
        assert!(!sources.vertex.contains(STAGE_MARKER));
    }

    #[test]
    fn test_stage_order_does_not_matter() {
        let sources =
            ShaderSources::parse("#shader fragment\nfn fs_main\n#shader vertex\nfn vs_main\n")
                .unwrap();
        assert_eq!(sources.vertex, "fn vs_main\n");
        assert_eq!(sources.fragment, "fn fs_main\n");
    }

    #[test]
    fn test_unknown_stage() {
        let err = ShaderSources::parse("#shader vertex\n\n#shader geometry\n").unwrap_err();
        match err {
            ShaderError::UnknownStage { name, line } => {
                assert_eq!(name, "geometry");
                assert_eq!(line, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_and_duplicate_stages() {
        assert!(matches!(
            ShaderSources::parse("#shader vertex\nV\n"),
            Err(ShaderError::MissingStage(ShaderStage::Fragment))
        ));
        assert!(matches!(
            ShaderSources::parse("no markers at all"),
            Err(ShaderError::MissingStage(ShaderStage::Vertex))
        ));
        assert!(matches!(
            ShaderSources::parse("#shader vertex\n#shader fragment\n#shader vertex\n"),
            Err(ShaderError::DuplicateStage(ShaderStage::Vertex))
        ));
    }

    #[test]
    fn test_marker_needs_whitespace() {
        let err = ShaderSources::parse("#shader vertex\n#shaderfoo\n").unwrap_err();
        assert!(matches!(err, ShaderError::MissingStage(ShaderStage::Fragment)));

        let sources = ShaderSources::parse(&format!("#shaderfoo\n{DESCRIPTION}")).unwrap();
        assert!(!sources.vertex.contains("#shaderfoo"));

        let tabbed = "#shader\tvertex\nfn vs_main\n#shader fragment\nfn fs_main\n";
        let sources = ShaderSources::parse(tabbed).unwrap();
        assert_eq!(sources.vertex, "fn vs_main\n");
    }

    #[test]
    fn test_missing_entry_point() {
        let renamed = DESCRIPTION.replace("fn fs_main", "fn main");
        match ShaderSources::parse(&renamed).unwrap_err() {
            ShaderError::MissingEntryPoint { stage, entry_point } => {
                assert_eq!(stage, ShaderStage::Fragment);
                assert_eq!(entry_point, FRAGMENT_ENTRY_POINT);
            }
            other => panic!("unexpected error: {other}"),
        }

        // A name that only starts with the entry point does not count.
        let prefixed = DESCRIPTION.replace("fn vs_main", "fn vs_main_old");
        assert!(matches!(
            ShaderSources::parse(&prefixed),
            Err(ShaderError::MissingEntryPoint {
                stage: ShaderStage::Vertex,
                ..
            })
        ));
    }

    #[test]
    fn test_bundled_description_parses() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/basic.shader");
        let sources = ShaderSources::load(path).unwrap();

        assert!(sources.vertex.contains(VERTEX_ENTRY_POINT));
        assert!(sources.fragment.contains(FRAGMENT_ENTRY_POINT));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = ShaderSources::load("does/not/exist.shader").unwrap_err();
        assert!(err.to_string().contains("does/not/exist.shader"));
    }
}
