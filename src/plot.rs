use crate::die_list::DiceList;
use crate::distribution::Distribution;
use crate::util::{DieMap, Error, Result};

/// Chart backend receiving outcome counts, keys ascending.
pub trait Render {
    fn render(&mut self, counts: &DieMap);
}

impl<F> Render for F
where
    F: FnMut(&DieMap),
{
    fn render(&mut self, counts: &DieMap) {
        self(counts)
    }
}

/// Builds the distribution for `dice` and hands its counts to `renderer`.
pub fn render_distribution<D, R>(dice: D, renderer: &mut R) -> Result<()>
where
    D: TryInto<DiceList>,
    Error: From<D::Error>,
    R: Render + ?Sized,
{
    let dist = Distribution::build(&dice.try_into()?)?;
    renderer.render(dist.counts());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::Count;

    struct Bars(Vec<(i64, Count)>);

    impl Render for Bars {
        fn render(&mut self, counts: &DieMap) {
            self.0 = counts.iter().map(|(k, c)| (*k, c.clone())).collect();
        }
    }

    #[test]
    fn renderer_gets_sorted_counts() {
        let mut bars = Bars(Vec::new());
        render_distribution([2, 2], &mut bars).unwrap();
        let keys: Vec<_> = bars.0.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![2, 3, 4]);
        assert_eq!(bars.0[1].1, Count::from(2u32));
    }

    #[test]
    fn closures_render_too() {
        let mut seen = 0;
        render_distribution(6, &mut |m: &DieMap| seen = m.len()).unwrap();
        assert_eq!(seen, 6);
    }

    #[test]
    fn nothing_rendered_on_error() {
        let mut called = false;
        let err = render_distribution(0, &mut |_: &DieMap| called = true);
        assert_eq!(err, Err(Error::InvalidDie(0)));
        assert!(!called);
    }
}
