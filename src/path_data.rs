//! Read SVG path data into curve commands.
//!
//! Edge geometry usually arrives from the rendering layer as an SVG `d`
//! string. This reader resolves relative commands and shorthand repeats so
//! that [`crate::path::sample_path`] only ever sees absolute coordinates.

use glam::DVec2;
use miette::NamedSource;
use pest::Parser;
use pest::error::InputLocation;
use pest::iterators::Pair;
use pest_derive::Parser;

use crate::errors::PathDataError;
use crate::path::PathCommand;

#[derive(Parser)]
#[grammar = "path_data.pest"]
struct PathDataParser;

const SOURCE_NAME: &str = "<path data>";

/// Parse SVG path data into absolute curve commands.
pub fn parse_path_data(source: &str) -> Result<Vec<PathCommand>, PathDataError> {
    let pairs = PathDataParser::parse(Rule::path_data, source)
        .map_err(|e| syntax_error(source, e))?;

    let mut reader = Reader::new(source);
    for pair in pairs {
        if pair.as_rule() == Rule::path_data {
            for command in pair.into_inner() {
                reader.read_command(command)?;
            }
        }
    }
    Ok(reader.commands)
}

fn named_source(source: &str) -> NamedSource<String> {
    NamedSource::new(SOURCE_NAME, source.to_string())
}

fn syntax_error(source: &str, err: pest::error::Error<Rule>) -> PathDataError {
    let (start, end) = match err.location {
        InputLocation::Pos(pos) => (pos, pos),
        InputLocation::Span(span) => span,
    };
    PathDataError::Syntax {
        message: err.variant.message().into_owned(),
        src: named_source(source),
        span: (start, end - start).into(),
    }
}

/// Tracks the pen position while commands are read.
struct Reader<'a> {
    source: &'a str,
    commands: Vec<PathCommand>,
    current: DVec2,
    subpath_start: Option<DVec2>,
}

impl<'a> Reader<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            commands: Vec::new(),
            current: DVec2::ZERO,
            subpath_start: None,
        }
    }

    fn read_command(&mut self, pair: Pair<Rule>) -> Result<(), PathDataError> {
        let rule = pair.as_rule();
        match rule {
            Rule::EOI => return Ok(()),
            Rule::move_to => {}
            _ => self.require_subpath(&pair)?,
        }

        if rule == Rule::close {
            self.commands.push(PathCommand::Close);
            if let Some(start) = self.subpath_start {
                self.current = start;
            }
            return Ok(());
        }

        let mut inner = pair.into_inner();
        let relative = inner
            .next()
            .is_some_and(|cmd| cmd.as_str().starts_with(|c: char| c.is_ascii_lowercase()));
        let operands: Vec<Pair<Rule>> = inner.collect();

        match rule {
            Rule::move_to => {
                for (i, operand) in operands.into_iter().enumerate() {
                    let p = self.point(operand, self.current, relative)?;
                    // Pairs after the first are implicit line-tos.
                    if i == 0 {
                        self.subpath_start = Some(p);
                        self.commands.push(PathCommand::MoveTo(p));
                    } else {
                        self.commands.push(PathCommand::LineTo(p));
                    }
                    self.current = p;
                }
            }
            Rule::line_to => {
                for operand in operands {
                    let p = self.point(operand, self.current, relative)?;
                    self.commands.push(PathCommand::LineTo(p));
                    self.current = p;
                }
            }
            Rule::horizontal => {
                for operand in operands {
                    let x = self.number(&operand)?;
                    let x = if relative { self.current.x + x } else { x };
                    self.current = DVec2::new(x, self.current.y);
                    self.commands.push(PathCommand::LineTo(self.current));
                }
            }
            Rule::vertical => {
                for operand in operands {
                    let y = self.number(&operand)?;
                    let y = if relative { self.current.y + y } else { y };
                    self.current = DVec2::new(self.current.x, y);
                    self.commands.push(PathCommand::LineTo(self.current));
                }
            }
            Rule::quad_to => {
                for chunk in operands.chunks(2) {
                    let origin = self.current;
                    let ctrl = self.point(chunk[0].clone(), origin, relative)?;
                    let to = self.point(chunk[1].clone(), origin, relative)?;
                    self.commands.push(PathCommand::QuadTo { ctrl, to });
                    self.current = to;
                }
            }
            Rule::cubic_to => {
                for chunk in operands.chunks(3) {
                    let origin = self.current;
                    let ctrl1 = self.point(chunk[0].clone(), origin, relative)?;
                    let ctrl2 = self.point(chunk[1].clone(), origin, relative)?;
                    let to = self.point(chunk[2].clone(), origin, relative)?;
                    self.commands.push(PathCommand::CubicTo { ctrl1, ctrl2, to });
                    self.current = to;
                }
            }
            other => {
                return Err(PathDataError::Syntax {
                    message: format!("unexpected rule {other:?}"),
                    src: named_source(self.source),
                    span: (0, self.source.len()).into(),
                });
            }
        }
        Ok(())
    }

    fn require_subpath(&self, pair: &Pair<Rule>) -> Result<(), PathDataError> {
        if self.subpath_start.is_some() {
            return Ok(());
        }
        let span = pair.as_span();
        Err(PathDataError::MissingMoveTo {
            src: named_source(self.source),
            span: (span.start(), span.end() - span.start()).into(),
        })
    }

    fn point(
        &self,
        pair: Pair<Rule>,
        origin: DVec2,
        relative: bool,
    ) -> Result<DVec2, PathDataError> {
        let mut coords = pair.into_inner();
        let (Some(x), Some(y)) = (coords.next(), coords.next()) else {
            return Err(PathDataError::Syntax {
                message: "expected a coordinate pair".to_string(),
                src: named_source(self.source),
                span: (0, self.source.len()).into(),
            });
        };
        let p = DVec2::new(self.number(&x)?, self.number(&y)?);
        Ok(if relative { origin + p } else { p })
    }

    fn number(&self, pair: &Pair<Rule>) -> Result<f64, PathDataError> {
        let text = pair.as_str();
        text.parse::<f64>().map_err(|_| {
            let span = pair.as_span();
            PathDataError::InvalidNumber {
                text: text.to_string(),
                src: named_source(self.source),
                span: (span.start(), span.end() - span.start()).into(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    #[test]
    fn parse_absolute_commands() {
        let commands = parse_path_data("M 0 0 L 100 0 Q 150 0 150 50 C 150 80 120 100 100 100 Z")
            .unwrap();
        assert_eq!(
            commands,
            vec![
                PathCommand::MoveTo(dvec2(0.0, 0.0)),
                PathCommand::LineTo(dvec2(100.0, 0.0)),
                PathCommand::QuadTo {
                    ctrl: dvec2(150.0, 0.0),
                    to: dvec2(150.0, 50.0)
                },
                PathCommand::CubicTo {
                    ctrl1: dvec2(150.0, 80.0),
                    ctrl2: dvec2(120.0, 100.0),
                    to: dvec2(100.0, 100.0)
                },
                PathCommand::Close,
            ]
        );
    }

    #[test]
    fn parse_relative_commands() {
        let commands = parse_path_data("m10,10 l20,0 h5 v-15 q5,0 5,5").unwrap();
        assert_eq!(
            commands,
            vec![
                PathCommand::MoveTo(dvec2(10.0, 10.0)),
                PathCommand::LineTo(dvec2(30.0, 10.0)),
                PathCommand::LineTo(dvec2(35.0, 10.0)),
                PathCommand::LineTo(dvec2(35.0, -5.0)),
                PathCommand::QuadTo {
                    ctrl: dvec2(40.0, -5.0),
                    to: dvec2(40.0, 0.0)
                },
            ]
        );
    }

    #[test]
    fn parse_implicit_repeats() {
        let commands = parse_path_data("M0 0 10 0 10 10 H 0 5 V 1e1").unwrap();
        assert_eq!(
            commands,
            vec![
                PathCommand::MoveTo(dvec2(0.0, 0.0)),
                PathCommand::LineTo(dvec2(10.0, 0.0)),
                PathCommand::LineTo(dvec2(10.0, 10.0)),
                PathCommand::LineTo(dvec2(0.0, 10.0)),
                PathCommand::LineTo(dvec2(5.0, 10.0)),
                PathCommand::LineTo(dvec2(5.0, 10.0)),
            ]
        );
    }

    #[test]
    fn parse_compact_numbers() {
        let commands = parse_path_data("M-1.5-2L.5.25").unwrap();
        assert_eq!(
            commands,
            vec![
                PathCommand::MoveTo(dvec2(-1.5, -2.0)),
                PathCommand::LineTo(dvec2(0.5, 0.25)),
            ]
        );
    }

    #[test]
    fn close_moves_pen_back_to_subpath_start() {
        let commands = parse_path_data("M 5 5 L 10 5 Z l 1 1").unwrap();
        assert_eq!(commands.last(), Some(&PathCommand::LineTo(dvec2(6.0, 6.0))));
    }

    #[test]
    fn empty_input_has_no_commands() {
        assert_eq!(parse_path_data("").unwrap(), Vec::new());
        assert_eq!(parse_path_data("  \n").unwrap(), Vec::new());
    }

    #[test]
    fn syntax_error_reports_span() {
        let err = parse_path_data("M 0 0 L 1").unwrap_err();
        assert!(matches!(err, PathDataError::Syntax { .. }), "{err:?}");
        let err = parse_path_data("M 0 0 X 3 3").unwrap_err();
        assert!(matches!(err, PathDataError::Syntax { .. }), "{err:?}");
    }

    #[test]
    fn drawing_before_move_is_rejected() {
        let err = parse_path_data("L 10 10").unwrap_err();
        match err {
            PathDataError::MissingMoveTo { span, .. } => {
                assert_eq!(span.offset(), 0);
                assert_eq!(span.len(), 7);
            }
            other => panic!("expected MissingMoveTo, got {other:?}"),
        }
    }
}
