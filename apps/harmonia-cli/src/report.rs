use harmonia::aspects::{AspectTable, ResonanceBatch};
use harmonia::chart::ChartId;
use harmonia::geometry::arrange_as_chain;
use harmonia::western::format_arc;
use harmonia::{Cluster, Pattern, PatternAnalysis, PatternTable, ResonanceMatrix};

const MIN_FRAME_WIDTH: usize = 30;
const MAX_FRAME_WIDTH: usize = 80;
const OWNER_NAME_LIMIT: usize = 4;

/// Corner, edge and side characters of a text frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameStyle {
    left_top: char,
    horizontal: char,
    right_top: char,
    vertical: char,
    left_bottom: char,
    right_bottom: char,
}

impl FrameStyle {
    pub const DOUBLE: FrameStyle = FrameStyle::new('╔', '═', '╗', '║', '╚', '╝');
    pub const SINGLE: FrameStyle = FrameStyle::new('┌', '─', '┐', '│', '└', '┘');
    pub const ASTERISK: FrameStyle = FrameStyle::new('*', '*', '*', '*', '*', '*');

    const fn new(
        left_top: char,
        horizontal: char,
        right_top: char,
        vertical: char,
        left_bottom: char,
        right_bottom: char,
    ) -> Self {
        Self {
            left_top,
            horizontal,
            right_top,
            vertical,
            left_bottom,
            right_bottom,
        }
    }
}

/// Surround `text` with a frame; lines wider than the frame are wrapped.
pub fn frame(text: &str, style: FrameStyle) -> String {
    let width = text
        .lines()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(MIN_FRAME_WIDTH, MAX_FRAME_WIDTH);
    let border = |left: char, right: char| {
        format!(
            "{}{}{}\n",
            left,
            style.horizontal.to_string().repeat(width + 2),
            right
        )
    };

    let mut out = border(style.left_top, style.right_top);
    for line in text.lines() {
        let chars: Vec<char> = line.chars().collect();
        let chunks: Vec<&[char]> = if chars.is_empty() {
            vec![&chars[..]]
        } else {
            chars.chunks(width).collect()
        };
        for chunk in chunks {
            let piece: String = chunk.iter().collect();
            out.push_str(&format!(
                "{} {}{} {}\n",
                style.vertical,
                piece,
                " ".repeat(width - chunk.len()),
                style.vertical
            ));
        }
    }
    out.push_str(&border(style.left_bottom, style.right_bottom));
    out
}

fn chart_names(matrix: &ResonanceMatrix, charts: &[ChartId]) -> Vec<String> {
    charts
        .iter()
        .map(|id| {
            matrix
                .chart(*id)
                .map(|c| c.name().to_string())
                .unwrap_or_else(|| format!("#{}", id.value()))
        })
        .collect()
}

fn short_owner(matrix: &ResonanceMatrix, id: ChartId) -> String {
    matrix
        .chart(id)
        .map(|c| c.shortened_name(OWNER_NAME_LIMIT))
        .unwrap_or_default()
}

/// Glyphs of a pattern's points along the zodiac, e.g. `☉☽♀`.
pub fn pattern_glyphs(pattern: &Pattern) -> String {
    let mut points: Vec<_> = pattern.members().iter().map(|m| m.point.clone()).collect();
    arrange_as_chain(&mut points);
    points.iter().map(|p| p.symbol()).collect()
}

/// Glyphs of a cluster; several points are braced above the first harmonic.
fn cluster_cell(cluster: &Cluster, harmonic: u32) -> String {
    let line: String = cluster
        .points_in_celestial_order()
        .iter()
        .map(|p| p.symbol())
        .collect();
    if cluster.len() > 1 && harmonic > 1 {
        format!("{{{}}}", line)
    } else {
        line
    }
}

/// One row per chart of the pattern; clusters of different charts that
/// conjoin each other share a column.
pub fn clustered_lines(pattern: &Pattern, matrix: &ResonanceMatrix) -> String {
    let mut clusters: Vec<Cluster> = pattern.clusters().to_vec();
    arrange_as_chain(&mut clusters);

    let mut placed = vec![false; clusters.len()];
    let mut columns: Vec<Vec<&Cluster>> = Vec::new();
    for i in 0..clusters.len() {
        if placed[i] {
            continue;
        }
        placed[i] = true;
        let mut column = vec![&clusters[i]];
        for j in (i + 1)..clusters.len() {
            if !placed[j]
                && column
                    .iter()
                    .any(|c| c.conjuncts_with(&clusters[j], matrix.settings()))
            {
                placed[j] = true;
                column.push(&clusters[j]);
            }
        }
        columns.push(column);
    }

    let widths: Vec<usize> = columns
        .iter()
        .map(|column| {
            column
                .iter()
                .map(|c| cluster_cell(c, pattern.harmonic()).chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let rows: Vec<String> = pattern
        .charts()
        .iter()
        .map(|owner| {
            let mut row = String::new();
            for (column, width) in columns.iter().zip(&widths) {
                let cell: String = column
                    .iter()
                    .filter(|c| c.chart() == *owner)
                    .map(|c| cluster_cell(c, pattern.harmonic()))
                    .collect();
                let filler = width.saturating_sub(cell.chars().count());
                row.push_str(&cell);
                row.push_str(&"-".repeat(filler));
            }
            row
        })
        .collect();
    rows.join("\n")
}

/// Pattern heading with its strength and size, then every point by
/// connectivity with its own strength.
pub fn connectivity_report(pattern: &Pattern, matrix: &ResonanceMatrix) -> String {
    if pattern.size() < 2 {
        return format!("{} (-)\n", pattern_glyphs(pattern));
    }
    let points: Vec<String> = pattern
        .members_by_connectivity()
        .into_iter()
        .map(|member| {
            let owner = if pattern.dimension() > 1 {
                format!("<{}>", short_owner(matrix, member.point.chart()))
            } else {
                String::new()
            };
            format!(
                "{}{} :{:.0}%",
                member.point.symbol_with_degree(),
                owner,
                pattern.member_strength(member)
            )
        })
        .collect();
    format!(
        "{}: {:.0}% ({}):\n\t{}\n",
        clustered_lines(pattern, matrix),
        pattern.average_strength(),
        pattern.size(),
        points.join(" / ")
    )
}

/// `"h: glyphs | glyphs"` for each harmonic up to `edge`, `-` where nothing was found.
pub fn short_analysis(analysis: &PatternAnalysis, edge: u32) -> String {
    let mut out = String::new();
    for harmonic in 1..=edge {
        let patterns = analysis.patterns_for(harmonic);
        let view = if patterns.is_empty() {
            "-".to_string()
        } else {
            patterns
                .iter()
                .map(pattern_glyphs)
                .collect::<Vec<_>>()
                .join(" | ")
        };
        out.push_str(&format!("{}: {}\n", harmonic, view));
    }
    out
}

pub fn detailed_harmonic(analysis: &PatternAnalysis, harmonic: u32, matrix: &ResonanceMatrix) -> String {
    let patterns = analysis.patterns_for(harmonic);
    if patterns.is_empty() {
        return frame(&format!("No patterns at harmonic {}", harmonic), FrameStyle::SINGLE);
    }
    let header = frame(
        &format!(
            "Patterns at harmonic {}\n   <{} points, average strength {:.0}%>",
            harmonic,
            analysis.points_count_for(harmonic),
            analysis.average_strength_for(harmonic)
        ),
        FrameStyle::SINGLE,
    );
    let body: Vec<String> = patterns
        .iter()
        .map(|p| connectivity_report(p, matrix))
        .collect();
    format!("{}{}\n", header, body.join("_______\n"))
}

pub fn pattern_report(table: &PatternTable, matrix: &ResonanceMatrix, detailed: bool) -> String {
    let title = if detailed {
        "Detailed pattern analysis for: "
    } else {
        "Pattern analysis for: "
    };
    let all = chart_names(matrix, &matrix.chart_ids()).join(" and ");
    let mut out = frame(&format!("{}{}", title, all), FrameStyle::DOUBLE);
    let edge = matrix.settings().edge_harmonic;

    for entry in table.entries() {
        if matrix.charts().len() > 1 {
            out.push_str(&frame(
                &format!("Pattern table for {}:", chart_names(matrix, &entry.charts).join(" and ")),
                FrameStyle::ASTERISK,
            ));
        }
        if detailed {
            for harmonic in 1..=edge {
                out.push_str(&detailed_harmonic(&entry.analysis, harmonic, matrix));
            }
        } else {
            out.push_str(&short_analysis(&entry.analysis, edge));
        }
    }
    out
}

fn batch_line(batch: &ResonanceBatch, matrix: &ResonanceMatrix) -> String {
    let side = |point: &harmonia::Point| {
        if batch.is_synastric() {
            format!("{}<{}>", point.symbol_with_degree(), short_owner(matrix, point.chart()))
        } else {
            point.symbol_with_degree()
        }
    };
    let aspects: Vec<String> = batch
        .aspects()
        .iter()
        .map(|aspect| {
            let precision = aspect.precision();
            format!(
                "\t{}/{} {} {} {:.0}% (off by {})",
                aspect.multiplicity,
                aspect.numeric,
                precision.label(),
                precision.rating(),
                aspect.strength,
                format_arc(aspect.clearance)
            )
        })
        .collect();
    format!(
        "{} - {} ({}):\n{}\n",
        side(batch.first()),
        side(batch.second()),
        format_arc(batch.arc()),
        aspects.join("\n")
    )
}

pub fn aspect_report(table: &AspectTable, matrix: &ResonanceMatrix) -> String {
    let all = chart_names(matrix, &matrix.chart_ids()).join(" and ");
    let mut out = frame(&format!("Aspects for: {}", all), FrameStyle::DOUBLE);
    for entry in table.entries() {
        let names = chart_names(matrix, &entry.charts);
        let heading = match names.as_slice() {
            [single] => format!("Aspects within {}", single),
            _ => format!("Aspects between {}", names.join(" and ")),
        };
        out.push_str(&frame(&heading, FrameStyle::ASTERISK));
        if entry.batches.is_empty() {
            out.push_str("-\n");
        }
        for batch in &entry.batches {
            out.push_str(&batch_line(batch, matrix));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use harmonia::{Chart, Point, ResonanceSettings};

    #[test]
    fn test_frame_pads_lines() {
        let framed = frame("abc\nde", FrameStyle::ASTERISK);
        let lines: Vec<&str> = framed.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|l| l.chars().count() == MIN_FRAME_WIDTH + 4));
        assert!(lines[1].starts_with("* abc "));
    }

    #[test]
    fn test_short_analysis() {
        let chart = Chart::with_points(
            "natal",
            [Point::new("sun", 0.0), Point::new("moon", 120.0), Point::new("venus", 240.0)],
        );
        let settings = ResonanceSettings::new(3, 30, true);
        let matrix = ResonanceMatrix::new(&[chart.clone()], &settings);
        let analysis = matrix.pattern_analysis(&[chart.id()]);
        assert_eq!(short_analysis(&analysis, 3), "1: -\n2: -\n3: ☉☽♀\n");
    }

    #[test]
    fn test_clustered_lines_for_two_charts() {
        let a = Chart::with_points("A", [Point::new("sun", 0.0), Point::new("moon", 120.0)]);
        let b = Chart::with_points("B", [Point::new("mars", 2.0)]);
        let matrix = ResonanceMatrix::new(&[a.clone(), b.clone()], &ResonanceSettings::new(3, 30, true));
        let patterns = matrix.find_patterns(3, &[a.id(), b.id()]);
        assert_eq!(patterns.len(), 1);
        assert_eq!(clustered_lines(&patterns[0], &matrix), "☉☽\n♂-");
    }

    #[test]
    fn test_conjunction_cluster_is_braced() {
        let chart = Chart::with_points(
            "natal",
            [Point::new("sun", 0.0), Point::new("moon", 2.0), Point::new("venus", 120.0)],
        );
        let matrix = ResonanceMatrix::new(&[chart.clone()], &ResonanceSettings::new(3, 30, true));
        let patterns = matrix.find_patterns(3, &[chart.id()]);
        assert_eq!(patterns.len(), 1);
        assert_eq!(clustered_lines(&patterns[0], &matrix), "{☉☽}♀");
    }

    #[test]
    fn test_cluster_unbraced_at_first_harmonic() {
        let chart = Chart::with_points("natal", [Point::new("sun", 0.0), Point::new("moon", 2.0)]);
        let matrix = ResonanceMatrix::new(&[chart.clone()], &ResonanceSettings::new(3, 30, true));
        let patterns = matrix.find_patterns(1, &[chart.id()]);
        assert_eq!(clustered_lines(&patterns[0], &matrix), "☉☽");
    }
}
