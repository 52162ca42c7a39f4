use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::ranking::RankingStats;
use crate::store::{RankingEntry, Team, YearBreakdown};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format points in compact notation (1.5k, 2.3M, 847)
pub fn format_points(points: f64) -> String {
    let formatted = if points >= 1_000_000.0 {
        format!("{:.1}M", points / 1_000_000.0)
    } else if points >= 1_000.0 {
        format!("{:.1}k", points / 1_000.0)
    } else {
        format!("{:.0}", points)
    };

    // Trim trailing .0 (e.g., "1.0k" -> "1k")
    formatted
        .replace(".0M", "M")
        .replace(".0k", "k")
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn display_name(team: &Team) -> String {
    match &team.club {
        Some(club) => format!("{} ({})", team.name, club),
        None => team.name.clone(),
    }
}

/// Format a ranking as one line per team: rank, points, name
/// Rank column: 4 chars (fits "999."), right-aligned
/// Points column is right-aligned, 7 chars wide (fits "9999.9M")
pub fn format_ranking_table(entries: &[RankingEntry], use_colors: bool) -> String {
    if entries.is_empty() {
        return "No ranked teams.".to_string();
    }

    let term_width = get_terminal_width();
    let rank_width = 4;
    let points_width = 7;
    let separator = "  ";
    let fixed_width = rank_width + 1 + points_width + separator.len();

    entries
        .iter()
        .map(|entry| {
            let rank_str = format!("{:>3}.", entry.rank);
            let points_padded = format!("{:>width$}", format_points(entry.total_points), width = points_width);

            let name = display_name(&entry.team);
            let name = match term_width {
                Some(width) if width > fixed_width + 10 => truncate_name(&name, width - fixed_width),
                // Very narrow terminal, show truncated
                Some(_) => truncate_name(&name, 20),
                // No terminal (pipe), don't truncate
                None => name,
            };

            if use_colors {
                format!("{} {}{}{}", rank_str.dimmed(), points_padded.bold(), separator, name)
            } else {
                format!("{} {}{}{}", rank_str, points_padded, separator, name)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format one year of a team's breakdown
pub fn format_year(year: &YearBreakdown, use_colors: bool) -> String {
    let line = if year.zero_filled {
        format!("{}: not scored (counted as 0)", year.year)
    } else {
        format!(
            "{}: ({:.0} + {:.0} x {:.2}) x {:.2} = {:.1}",
            year.year,
            year.ce_points,
            year.regional_points,
            year.regional_coefficient,
            year.temporal_weight,
            year.weighted_points
        )
    };

    if use_colors && year.zero_filled {
        line.yellow().to_string()
    } else {
        line
    }
}

/// Format a ranked team with its per-year breakdown (for --details)
pub fn format_entry_detail(entry: &RankingEntry, use_colors: bool) -> String {
    let header = format!(
        "{}. {} - {} pts",
        entry.rank,
        display_name(&entry.team),
        format_points(entry.total_points)
    );
    let header = if use_colors {
        header.bold().to_string()
    } else {
        header
    };

    let mut lines = vec![header];
    lines.extend(
        entry
            .year_breakdown
            .iter()
            .map(|y| format!("  {}", format_year(y, use_colors))),
    );
    lines.join("\n")
}

/// Format ranking statistics: overall figures, top teams, per-region table
pub fn format_stats(stats: &RankingStats, use_colors: bool) -> String {
    let mut lines = Vec::new();

    let title = format!("Ranking {}", stats.year);
    lines.push(if use_colors { title.bold().to_string() } else { title });
    lines.push(format!("  Teams: {}", stats.team_count));
    lines.push(format!("  Average: {:.1} pts", stats.average_points));

    if !stats.top.is_empty() {
        lines.push(String::new());
        lines.push(format!("Top {}", stats.top.len()));
        lines.push(format_ranking_table(&stats.top, use_colors));
    }

    if !stats.regions.is_empty() {
        lines.push(String::new());
        lines.push("Regions".to_string());
        for region in &stats.regions {
            let name = if use_colors {
                region.region_name.cyan().to_string()
            } else {
                region.region_name.clone()
            };
            lines.push(format!(
                "  {}: {} teams, {} pts total, {:.1} avg",
                name,
                region.team_count,
                format_points(region.total_points),
                region.average_points
            ));
        }
    }

    lines.join("\n")
}

/// Format a ranking as tab-separated values for scripting
/// Columns: rank, points, team id, team name (no headers, no colors)
pub fn format_tsv(entries: &[RankingEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            format!(
                "{}\t{:.2}\t{}\t{}",
                entry.rank, entry.total_points, entry.team.id, entry.team.name
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::RegionStats;

    fn sample_entry(rank: u32, name: &str, total_points: f64) -> RankingEntry {
        RankingEntry {
            rank,
            team: Team {
                id: rank as u64,
                name: name.to_string(),
                club: None,
                region_id: 1,
            },
            total_points,
            year_breakdown: vec![
                YearBreakdown {
                    year: 2025,
                    ce_points: 1000.0,
                    regional_points: 140.0,
                    regional_coefficient: 0.8,
                    temporal_weight: 1.0,
                    weighted_points: 1112.0,
                    zero_filled: false,
                },
                YearBreakdown::zero_filled(2024, 0.75),
            ],
        }
    }

    // format_points tests
    #[test]
    fn test_format_points_small() {
        assert_eq!(format_points(500.0), "500");
    }

    #[test]
    fn test_format_points_zero() {
        assert_eq!(format_points(0.0), "0");
    }

    #[test]
    fn test_format_points_thousand_exact() {
        assert_eq!(format_points(1000.0), "1k");
    }

    #[test]
    fn test_format_points_thousand_decimal() {
        assert_eq!(format_points(1500.0), "1.5k");
    }

    #[test]
    fn test_format_points_million_decimal() {
        assert_eq!(format_points(2_300_000.0), "2.3M");
    }

    // truncate_name tests
    #[test]
    fn test_truncate_name_short() {
        assert_eq!(truncate_name("Harbour", 20), "Harbour");
    }

    #[test]
    fn test_truncate_name_long() {
        assert_eq!(truncate_name("Harbour Athletic Club", 15), "Harbour Athl...");
    }

    #[test]
    fn test_truncate_name_very_narrow() {
        assert_eq!(truncate_name("Harbour", 3), "Har");
    }

    #[test]
    fn test_format_ranking_table_empty() {
        assert_eq!(format_ranking_table(&[], false), "No ranked teams.");
    }

    #[test]
    fn test_format_ranking_table_rows() {
        let mut second = sample_entry(2, "Valley", 112.0);
        second.team.club = Some("Valley SC".to_string());
        let entries = vec![sample_entry(1, "Harbour", 1500.0), second];

        let result = format_ranking_table(&entries, false);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("  1."));
        assert!(lines[0].contains("1.5k"));
        assert!(lines[0].contains("Harbour"));
        assert!(lines[1].contains("112"));
        assert!(lines[1].contains("Valley (Valley SC)"));
    }

    #[test]
    fn test_format_entry_detail() {
        let result = format_entry_detail(&sample_entry(1, "Harbour", 1112.0), false);
        assert!(result.starts_with("1. Harbour - 1.1k pts"));
        assert!(result.contains("2025: (1000 + 140 x 0.80) x 1.00 = 1112.0"));
        assert!(result.contains("2024: not scored (counted as 0)"));
    }

    #[test]
    fn test_format_stats() {
        let stats = RankingStats {
            year: 2025,
            team_count: 2,
            average_points: 806.0,
            top: vec![sample_entry(1, "Harbour", 1500.0)],
            regions: vec![RegionStats {
                region_id: 1,
                region_name: "North".to_string(),
                team_count: 2,
                total_points: 1612.0,
                average_points: 806.0,
            }],
        };

        let result = format_stats(&stats, false);
        assert!(result.contains("Ranking 2025"));
        assert!(result.contains("Teams: 2"));
        assert!(result.contains("Top 1"));
        assert!(result.contains("North: 2 teams, 1.6k pts total, 806.0 avg"));
    }

    #[test]
    fn test_format_tsv() {
        let entries = vec![sample_entry(1, "Harbour", 1500.25)];
        assert_eq!(format_tsv(&entries), "1\t1500.25\t1\tHarbour");
        assert_eq!(format_tsv(&[]), "");
    }
}
