use super::outcome::{Outcome, OutcomeValue, Source};
use crate::common::Int;

/// Renders an [Outcome] as text. Every method has a plain default, so an
/// implementation only overrides the parts it decorates.
pub trait Stringify {
    fn stringify(&mut self, outcome: &Outcome<'_>) -> String {
        if outcome.kept() {
            self.str_value(outcome)
        } else {
            self.str_dropped(outcome)
        }
    }

    /// Rendering of an outcome an enclosing sub-pool did not keep.
    fn str_dropped(&mut self, outcome: &Outcome<'_>) -> String {
        self.str_value(outcome)
    }

    fn str_value(&mut self, outcome: &Outcome<'_>) -> String {
        match &outcome.value {
            OutcomeValue::Constant(x) => self.str_constant(*x),
            OutcomeValue::Rolled(draws) => self.str_rolled(outcome.source, draws),
            OutcomeValue::Group(children) => self.str_group(outcome.source, children),
        }
    }

    /// The rendered outcome followed by its sum.
    fn str_result(&mut self, outcome: &Outcome<'_>) -> String {
        let tree = self.stringify(outcome);
        format!("{} = {}", tree, outcome.total())
    }

    fn str_constant(&mut self, x: Int) -> String {
        x.to_string()
    }

    fn str_rolled(&mut self, source: Source<'_>, draws: &[Int]) -> String {
        let draws = draws
            .iter()
            .enumerate()
            .map(|(i, &draw)| self.str_draw(source, draw, i + 1 < draws.len()))
            .collect::<Vec<_>>()
            .join(", ");
        format!("[{}]", draws)
    }

    /// `exploded` is set on draws that made an exploding die roll again.
    fn str_draw(&mut self, _source: Source<'_>, draw: Int, exploded: bool) -> String {
        if exploded {
            format!("{}!", draw)
        } else {
            draw.to_string()
        }
    }

    fn str_group(&mut self, source: Source<'_>, children: &[Outcome<'_>]) -> String {
        let inner = children
            .iter()
            .map(|child| self.stringify(child))
            .collect::<Vec<_>>()
            .join(" + ");
        match source {
            Source::SubPool(sub) => format!("{}{}o({})", sub.selection(), sub.n(), inner),
            _ => inner,
        }
    }
}

/// Plain text; dropped components are wrapped in `~`.
#[derive(Default)]
pub struct SimpleStringifier;

impl SimpleStringifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stringify(&mut self, outcome: &Outcome<'_>) -> String {
        Stringify::stringify(self, outcome)
    }
}

impl Stringify for SimpleStringifier {
    fn str_dropped(&mut self, outcome: &Outcome<'_>) -> String {
        format!("~{}~", self.str_value(outcome))
    }
}

#[derive(Default)]
pub struct MarkdownStringifier {
    in_dropped: bool,
}

impl MarkdownStringifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn reset(&mut self) {
        self.in_dropped = false;
    }

    pub fn stringify(&mut self, outcome: &Outcome<'_>) -> String {
        self.reset();
        Stringify::stringify(self, outcome)
    }

    pub fn result(&mut self, outcome: &Outcome<'_>) -> String {
        self.reset();
        self.str_result(outcome)
    }
}

impl Stringify for MarkdownStringifier {
    fn str_dropped(&mut self, outcome: &Outcome<'_>) -> String {
        if self.in_dropped {
            return self.str_value(outcome);
        }
        self.in_dropped = true;
        let inside = self.str_value(outcome);
        self.in_dropped = false;
        format!("~~{}~~", inside)
    }

    fn str_result(&mut self, outcome: &Outcome<'_>) -> String {
        let tree = Stringify::stringify(self, outcome);
        format!("{} = `{}`", tree, outcome.total())
    }

    fn str_draw(&mut self, source: Source<'_>, draw: Int, exploded: bool) -> String {
        let max = source.faces().map(|faces| Int::from(faces.get()));
        let mut ret = draw.to_string();
        if exploded {
            ret.push('!');
        }
        if draw == 1 || Some(draw) == max {
            format!("**{}**", ret)
        } else {
            ret
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::test_utils::*;
    use crate::roll::roller::StepRoller;

    fn check<S: Stringify + Default>(input: &str, initial: UInt, expected: &str) {
        let pool = crate::parse(input).unwrap();
        let mut roller = StepRoller::new(nz(initial), 1);
        let outcome = crate::model::Model::roll(&pool, &mut roller);
        let actual = S::default().str_result(&outcome);
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_simple_stringify() {
        check::<SimpleStringifier>("3", 1, "3 = 3");
        check::<SimpleStringifier>("2d20+4", 10, "[10] + [11] + 4 = 25");
        check::<SimpleStringifier>("b1o(2d20)", 10, "b1o(~[10]~ + [11]) = 11");
        check::<SimpleStringifier>("w2o(3d6)+1", 5, "w2o([5] + ~[6]~ + [1]) + 1 = 7");
    }

    #[test]
    fn test_simple_stringify_exploding() {
        check::<SimpleStringifier>("d4!3", 3, "[3] = 3");
        check::<SimpleStringifier>("d4!3", 4, "[4!, 1] = 5");
    }

    #[test]
    fn test_markdown_stringify() {
        check::<MarkdownStringifier>("2d20", 10, "[10] + [11] = `21`");
        check::<MarkdownStringifier>("b1o(2d20)", 10, "b1o(~~[10]~~ + [11]) = `11`");
        check::<MarkdownStringifier>("3d6", 5, "[5] + [**6**] + [**1**] = `12`");
        check::<MarkdownStringifier>("d6!", 6, "[**6!**, **1**] = `7`");
    }

    #[test]
    fn test_markdown_nested_drop_is_struck_once() {
        check::<MarkdownStringifier>(
            "b1o(w1o(2d6)+d6)",
            2,
            "b1o(~~w1o([2] + [3])~~ + [4]) = `4`",
        );
    }

    #[test]
    fn test_outcome_display() {
        let pool = crate::parse("w1o(2d6)").unwrap();
        let mut roller = StepRoller::new(nz(3), 1);
        let outcome = crate::model::Model::roll(&pool, &mut roller);
        assert_eq!(outcome.to_string(), "w1o([3] + ~[4]~)");
    }
}
