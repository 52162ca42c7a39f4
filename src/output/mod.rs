pub mod formatter;

pub use formatter::{
    format_entry_detail, format_points, format_ranking_table, format_stats, format_tsv,
    format_year, should_use_colors,
};
