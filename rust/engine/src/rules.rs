use crate::cards::{Card, CardState};

/// Decides whether three cards form a set.
///
/// For each of the four attributes the three values must be all equal or
/// pairwise distinct. Only the first three cards are considered; fewer than
/// three cards never form a set.
///
/// # Examples
///
/// ```
/// use setgame_engine::cards::{Card, CardState::*};
/// use setgame_engine::rules::is_set;
///
/// let a = Card::new(Alpha, Alpha, Alpha, Alpha);
/// let b = Card::new(Beta, Alpha, Beta, Alpha);
/// let c = Card::new(Gamma, Alpha, Gamma, Alpha);
/// assert!(is_set(&[a, b, c]));
/// assert!(!is_set(&[a, b]));
/// ```
pub fn is_set(cards: &[Card]) -> bool {
    if cards.len() < 3 {
        return false;
    }
    let (a, b, c) = (cards[0].attributes(), cards[1].attributes(), cards[2].attributes());
    (0..4).all(|i| CardState::all_same_or_all_different(a[i], b[i], c[i]))
}

/// Every set among `cards`, in enumeration order of positions `i < j < k`.
///
/// Triples containing the same card value twice are skipped. Returns an
/// empty vector when fewer than three cards are given or no set exists.
pub fn find_sets(cards: &[Card]) -> Vec<[Card; 3]> {
    candidate_triples(cards).filter(|t| is_set(t)).collect()
}

pub fn is_set_possible(cards: &[Card]) -> bool {
    one_possible_set(cards).is_some()
}

/// First set in [`find_sets`] order, without enumerating the rest.
pub fn one_possible_set(cards: &[Card]) -> Option<[Card; 3]> {
    candidate_triples(cards).find(|t| is_set(t))
}

fn candidate_triples(cards: &[Card]) -> impl Iterator<Item = [Card; 3]> + '_ {
    let n = cards.len();
    (0..n)
        .flat_map(move |i| {
            ((i + 1)..n).flat_map(move |j| ((j + 1)..n).map(move |k| [cards[i], cards[j], cards[k]]))
        })
        .filter(|[a, b, c]| a != b && b != c && a != c)
}

/// The unique card completing a set with `a` and `b`.
pub fn third_card(a: &Card, b: &Card) -> Card {
    Card::new(
        a.number.complement(b.number),
        a.symbol.complement(b.symbol),
        a.shading.complement(b.shading),
        a.color.complement(b.color),
    )
}
