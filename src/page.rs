//! Static page sections: navbar/greeting, about, skills, projects, contact
//! heading and footer.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Color, Print, PrintStyledContent, ResetColor, SetForegroundColor, Stylize};

use crate::config::{Config, Skill};

/// Navbar title and hero greeting. The typed line follows directly below.
pub fn render_header<W: Write>(out: &mut W, config: &Config) -> io::Result<()> {
    queue!(
        out,
        PrintStyledContent(config.site.title.as_str().bold()),
        Print("\n\n"),
        PrintStyledContent(format!("Hi, I'm {}", config.site.name).bold().cyan()),
        Print("\n"),
    )?;
    out.flush()
}

/// Calls to action under the typed line: the projects pointer and the
/// resume link when one is configured.
pub fn render_calls_to_action<W: Write>(out: &mut W, config: &Config) -> io::Result<()> {
    if !config.projects.is_empty() {
        queue!(out, Print("  "), PrintStyledContent("View My Work".bold()), Print(": see Projects below\n"))?;
    }
    if let Some(url) = &config.site.resume_url {
        queue!(out, Print("  "), PrintStyledContent("Download Resume".bold()), Print(format!(": {url}\n")))?;
    }
    out.flush()
}

/// About, skills and projects. Empty sections are skipped.
pub fn render_sections<W: Write>(out: &mut W, config: &Config) -> io::Result<()> {
    if !config.site.about.trim().is_empty() {
        heading(out, "About Me")?;
        queue!(out, Print(config.site.about.trim()), Print("\n"))?;
    }

    if !config.skills.is_empty() {
        heading(out, "Skills")?;
        for skill in &config.skills {
            skill_line(out, skill)?;
        }
    }

    if !config.projects.is_empty() {
        heading(out, "Projects")?;
        for project in &config.projects {
            queue!(out, Print("  "), PrintStyledContent(project.name.as_str().bold()), Print("\n"))?;
            if !project.description.is_empty() {
                queue!(out, Print(format!("    {}\n", project.description)))?;
            }
            queue!(out, Print(format!("    Live Demo: {}\n", project.link)))?;
        }
    }

    out.flush()
}

pub fn render_contact_heading<W: Write>(out: &mut W, config: &Config) -> io::Result<()> {
    heading(out, "Contact Me")?;
    queue!(out, Print(&config.site.contact_blurb), Print("\n"))?;
    out.flush()
}

pub fn render_footer<W: Write>(out: &mut W, config: &Config) -> io::Result<()> {
    queue!(
        out,
        Print("\n"),
        PrintStyledContent(
            format!("© {} {}. All rights reserved.", config.site.footer_year, config.site.name).dim()
        ),
        Print("\n"),
    )?;
    for social in &config.socials {
        queue!(out, Print(format!("  {}: {}\n", social.label, social.url)))?;
    }
    out.flush()
}

fn heading<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    queue!(out, Print("\n"), PrintStyledContent(title.bold().underlined()), Print("\n"))
}

fn skill_line<W: Write>(out: &mut W, skill: &Skill) -> io::Result<()> {
    match skill.color.as_deref().and_then(parse_hex_color) {
        Some(color) => queue!(out, Print("  "), SetForegroundColor(color), Print("■"), ResetColor)?,
        None => queue!(out, Print("  ■"))?,
    }
    queue!(out, Print(" "), Print(&skill.name), Print("\n"))
}

/// Parse `#RRGGBB` or `#RGB` into an RGB terminal colour.
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    let (r, g, b) = match digits.len() {
        6 => (channel(&digits[0..2])?, channel(&digits[2..4])?, channel(&digits[4..6])?),
        3 => {
            let expand = |i: usize| channel(&digits[i..=i]).map(|v| v * 17);
            (expand(0)?, expand(1)?, expand(2)?)
        }
        _ => return None,
    };
    Some(Color::Rgb { r, g, b })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn hex_colors() {
        assert_eq!(parse_hex_color("#61DBFB"), Some(Color::Rgb { r: 0x61, g: 0xDB, b: 0xFB }));
        assert_eq!(parse_hex_color("#fff"), Some(Color::Rgb { r: 255, g: 255, b: 255 }));
        assert_eq!(parse_hex_color("61DBFB"), None);
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
    }

    #[test]
    fn header_greets_by_name() {
        let cfg = Config::test_default();
        let out = render(|buf| render_header(buf, &cfg));
        assert!(out.contains("My Portfolio"));
        assert!(out.contains("Hi, I'm Test Person"));
    }

    #[test]
    fn calls_to_action_point_at_projects_and_resume() {
        let cfg = Config::test_default();
        let out = render(|buf| render_calls_to_action(buf, &cfg));
        assert!(out.contains("View My Work"));
        assert!(out.contains("Download Resume"));
        assert!(out.contains(": https://example.com/resume.pdf"));
    }

    #[test]
    fn resume_link_is_optional() {
        let mut cfg = Config::test_default();
        cfg.site.resume_url = None;
        cfg.projects.clear();
        let out = render(|buf| render_calls_to_action(buf, &cfg));
        assert!(out.is_empty());
    }

    #[test]
    fn sections_list_content() {
        let cfg = Config::test_default();
        let out = render(|buf| render_sections(buf, &cfg));
        assert!(out.contains("About Me"));
        assert!(out.contains("I build things."));
        assert!(out.contains("Skills"));
        assert!(out.contains("Rust"));
        assert!(out.contains("Portfolio Website"));
        assert!(out.contains("Live Demo: #"));
    }

    #[test]
    fn empty_sections_are_skipped() {
        let mut cfg = Config::test_default();
        cfg.site.about.clear();
        cfg.skills.clear();
        cfg.projects.clear();
        let out = render(|buf| render_sections(buf, &cfg));
        assert!(out.is_empty());
    }

    #[test]
    fn footer_has_year_and_socials() {
        let cfg = Config::test_default();
        let out = render(|buf| render_footer(buf, &cfg));
        assert!(out.contains("© 2025 Test Person. All rights reserved."));
        assert!(out.contains("GitHub: https://github.com/example"));
    }

    #[test]
    fn contact_heading_uses_blurb() {
        let cfg = Config::test_default();
        let out = render(|buf| render_contact_heading(buf, &cfg));
        assert!(out.contains("Contact Me"));
        assert!(out.contains("Have a project in mind?"));
    }
}
