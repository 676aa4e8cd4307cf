use rand::Rng;

/// Cumulative-weight table of a sealed variable.
///
/// Built once at seal time. The probability of alternative `i` is
/// `weight(i) / total`; if every weight is zero the table degrades to a
/// uniform choice instead of an always-empty one.
#[derive(Debug)]
pub struct WeightTable {
    cumulative: Vec<i64>,
    total: i64,
}

impl WeightTable {
    /// `weights` must be non-empty with a non-overflowing sum; insertion
    /// already rejected anything else
    pub fn build(weights: &[i64]) -> Self {
        let mut cumulative = Vec::with_capacity(weights.len());
        let mut total = 0i64;

        for weight in weights {
            total += weight;
            cumulative.push(total);
        }

        if cumulative.len() > 1 && total == 0 {
            for (index, bound) in cumulative.iter_mut().enumerate() {
                *bound = (index + 1) as i64;
            }
            total = cumulative.len() as i64;
        }

        WeightTable { cumulative, total }
    }

    pub fn draw(&self, rng: &mut impl Rng) -> usize {
        if self.cumulative.len() == 1 {
            return 0;
        }

        let roll = rng.gen_range(0..self.total);

        for (index, bound) in self.cumulative.iter().enumerate() {
            if *bound > roll {
                return index;
            }
        }

        self.cumulative.len() - 1
    }
}
