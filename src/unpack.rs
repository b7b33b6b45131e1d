use crate::{unpack_tau_word, LinkBuffers, TauBxCollection, TauPackError};

/// De-interleave packed links back into a tau collection.
///
/// Zero words are padding and are skipped, so a candidate whose fields all
/// pack to zero does not survive the round trip.
pub fn unpack_links(links: &LinkBuffers) -> Result<TauBxCollection, TauPackError> {
    unpack_words(&links.link1, &links.link2, links.first_bx, links.frames_per_bx)
}

/// Split raw link words with a fixed `stride` starting at `first_bx`.
pub fn unpack_words(
    link1: &[u32],
    link2: &[u32],
    first_bx: i32,
    stride: usize,
) -> Result<TauBxCollection, TauPackError> {
    if stride == 0 {
        return Err(TauPackError::Decode("zero frames per bx".into()));
    }
    if link1.len() % stride != 0 || link2.len() % stride != 0 {
        return Err(TauPackError::Decode(format!(
            "link lengths {} / {} are not multiples of {}",
            link1.len(),
            link2.len(),
            stride
        )));
    }
    if link1.len() != link2.len() {
        return Err(TauPackError::Decode(format!(
            "links carry different crossing counts ({} vs {})",
            link1.len() / stride,
            link2.len() / stride
        )));
    }

    let n_bx = link1.len() / stride;
    let last_bx = i64::try_from(n_bx)
        .ok()
        .and_then(|n| i32::try_from(i64::from(first_bx) + n - 1).ok())
        .ok_or_else(|| {
            TauPackError::Decode(format!(
                "{n_bx} crossings starting at bx {first_bx} run past the i32 range"
            ))
        })?;
    let mut taus = TauBxCollection::new(first_bx, last_bx);
    for (i, (c1, c2)) in link1.chunks(stride).zip(link2.chunks(stride)).enumerate() {
        // bounded by last_bx
        let bx = (i64::from(first_bx) + i as i64) as i32;
        for &word in c1.iter().chain(c2.iter()).filter(|&&w| w != 0) {
            taus.push(bx, unpack_tau_word(word))?;
        }
    }
    Ok(taus)
}
