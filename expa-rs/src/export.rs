//! PDF export by compiling a minimal LaTeX document with `pdflatex`.

use anyhow::{bail, Context, Result};
use expa_expand::{fmt, Expansion};
use std::path::Path;
use std::process::Command;

/// Renders the expansion as a standalone LaTeX document showing `input = output`.
fn document(expansion: &Expansion) -> String {
    format!(
        "\\documentclass{{article}}\n\
         \\usepackage{{amsmath}}\n\
         \\pagestyle{{empty}}\n\
         \\begin{{document}}\n\
         \\begin{{align*}}\n\
         {} &= {}\n\
         \\end{{align*}}\n\
         \\end{{document}}\n",
        fmt::latex(&expansion.input),
        expansion.latex(),
    )
}

/// Writes the expansion to a PDF at `path` by running `pdflatex` on a generated `.tex` file.
///
/// The `.tex` file is written next to the requested PDF and left in place, so the document can
/// be inspected or recompiled by hand.
pub fn write_pdf(expansion: &Expansion, path: &Path) -> Result<()> {
    let tex_path = path.with_extension("tex");
    let out_dir = path.parent().filter(|dir| !dir.as_os_str().is_empty());

    std::fs::write(&tex_path, document(expansion))
        .with_context(|| format!("failed to write {}", tex_path.display()))?;

    let mut command = Command::new("pdflatex");
    command.arg("-interaction=nonstopmode");
    if let Some(dir) = out_dir {
        command.arg("-output-directory").arg(dir);
    }
    let output = command
        .arg(&tex_path)
        .output()
        .context("failed to run pdflatex; is a TeX distribution installed?")?;

    if !output.status.success() {
        // pdflatex writes its errors to stdout
        bail!(
            "pdflatex failed with {}:\n{}",
            output.status,
            String::from_utf8_lossy(&output.stdout),
        );
    }

    Ok(())
}
