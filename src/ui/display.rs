//! Display functions for installed versions
//!
//! Formatting is split from printing so the layout can be tested without
//! capturing stdout.

use std::collections::BTreeMap;

use console::Style;

use crate::store::InstalledVersion;

const CURRENT_MARK: &str = "[*current]";

/// One-line summary: `<id> (<name> <version>) [*current]`
pub fn version_line(version: &InstalledVersion) -> String {
    let mut line = version.id.clone();
    if let Some(identity) = &version.descriptor.identity {
        line.push_str(&format!(" ({} {})", identity.name, identity.version));
    }
    if version.is_current {
        line.push(' ');
        line.push_str(CURRENT_MARK);
    }
    line
}

/// Labelled detail lines, each prefixed with `indent` spaces
pub fn version_details(version: &InstalledVersion, indent: usize) -> Vec<String> {
    let pad = " ".repeat(indent);
    let label = Style::new().bold();
    let mut lines = Vec::new();

    let name = if version.is_current {
        Style::new()
            .green()
            .apply_to(format!("{} {CURRENT_MARK}", version.id))
            .to_string()
    } else {
        version.id.clone()
    };
    lines.push(format!("{pad}{} {name}", label.apply_to("name:       ")));
    lines.push(format!(
        "{pad}{} {}",
        label.apply_to("path:       "),
        version.path.display()
    ));

    if let Some(identity) = &version.descriptor.identity {
        lines.push(format!("{pad}{} {}", label.apply_to("npm name:   "), identity.name));
        lines.push(format!(
            "{pad}{} {}",
            label.apply_to("npm version:"),
            identity.version
        ));
    }

    if let Some(range) = &version.descriptor.compatibility {
        lines.push(format!("{pad}{} {range}", label.apply_to("compatible: ")));
    }

    if !version.descriptor.hooks.is_empty() {
        lines.push(format!("{pad}{}", label.apply_to("hooks:")));
        for (hook, command) in &version.descriptor.hooks {
            lines.push(format!("{pad}  {hook}: {command}"));
        }
    }

    if !version.descriptor.scripts.is_empty() {
        let names: Vec<&str> = version.descriptor.scripts.keys().map(String::as_str).collect();
        lines.push(format!(
            "{pad}{} {}",
            label.apply_to("scripts:"),
            names.join(", ")
        ));
    }

    lines
}

/// Print the newest-first listing with indexes
pub fn print_list(versions: &[InstalledVersion], detailed: bool) {
    if versions.is_empty() {
        println!("No versions installed.");
        return;
    }

    for (index, version) in versions.iter().enumerate() {
        if detailed && index > 0 {
            println!();
        }

        let line = format!("{index:>3}  {}", version_line(version));
        if version.is_current {
            println!("{}", Style::new().green().apply_to(line));
        } else {
            println!("{line}");
        }

        if detailed {
            for detail in version_details(version, 7) {
                println!("{detail}");
            }
        }
    }
}

/// Print all details of one version
pub fn print_info(version: &InstalledVersion) {
    for line in version_details(version, 2) {
        println!("{line}");
    }
}

/// Print surfaced scripts with their commands
pub fn print_scripts(scripts: &BTreeMap<String, String>) {
    if scripts.is_empty() {
        println!("No scripts available.");
        return;
    }

    for (name, command) in scripts {
        println!("  {}", Style::new().bold().apply_to(name));
        println!("    {}", if command.is_empty() { "-" } else { command });
    }
}
