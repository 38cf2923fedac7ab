/// Seat assignments for a four-agent table. Entry `i` of an assignment is the
/// agent index seated at `PlayerPosition::from_index(i)`.
///
/// The list interleaves the three possible pairings, so the first three
/// assignments give every agent each possible partner once.
pub struct SeatPermutations {
    permutations: Vec<[usize; 4]>,
}

impl SeatPermutations {
    pub const MAX: usize = 24;

    pub fn new(count: usize) -> Self {
        let mut all = Vec::with_capacity(Self::MAX);
        let mut base = [0usize, 1, 2, 3];
        generate(&mut base, 0, &mut all);

        let mut buckets: Vec<(usize, Vec<[usize; 4]>)> = Vec::new();
        for perm in all {
            let key = partner_of_first(&perm);
            match buckets.iter_mut().find(|(k, _)| *k == key) {
                Some((_, bucket)) => bucket.push(perm),
                None => buckets.push((key, vec![perm])),
            }
        }

        let limit = count.min(Self::MAX);
        let mut permutations = Vec::with_capacity(limit);
        let mut round = 0;
        while permutations.len() < limit {
            for (_, bucket) in &buckets {
                if let Some(perm) = bucket.get(round) {
                    permutations.push(*perm);
                    if permutations.len() == limit {
                        break;
                    }
                }
            }
            round += 1;
        }
        Self { permutations }
    }

    pub fn as_slice(&self) -> &[[usize; 4]] {
        &self.permutations
    }
}

/// Agent sitting across from agent 0.
pub(crate) fn partner_of_first(perm: &[usize; 4]) -> usize {
    let seat = perm.iter().position(|agent| *agent == 0).unwrap_or(0);
    perm[(seat + 2) % 4]
}

fn generate(data: &mut [usize; 4], start: usize, output: &mut Vec<[usize; 4]>) {
    if start == data.len() - 1 {
        output.push(*data);
        return;
    }

    for idx in start..data.len() {
        data.swap(start, idx);
        generate(data, start + 1, output);
        data.swap(start, idx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn returns_identity_first() {
        let perms = SeatPermutations::new(1);
        assert_eq!(perms.as_slice(), &[[0, 1, 2, 3]]);
    }

    #[test]
    fn first_three_cover_every_partnership() {
        let perms = SeatPermutations::new(3);
        let partners: HashSet<_> = perms.as_slice().iter().map(partner_of_first).collect();
        assert_eq!(partners, HashSet::from([1, 2, 3]));
    }

    #[test]
    fn caps_at_twenty_four_unique() {
        let perms = SeatPermutations::new(100);
        assert_eq!(perms.as_slice().len(), 24);
        let unique: HashSet<_> = perms.as_slice().iter().collect();
        assert_eq!(unique.len(), 24);
    }
}
