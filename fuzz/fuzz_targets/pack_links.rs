use honggfuzz::fuzz;
use taupack::{pack_links, unpack_links, DemuxConfig, Tau, TauBxCollection};

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            if data.len() < 2 {
                return;
            }
            let n_tau = (data[0] % 8) as usize;
            let cfg = match DemuxConfig::new(n_tau, n_tau + (data[1] % 4) as usize) {
                Ok(cfg) => cfg,
                Err(_) => return,
            };
            let mut taus = TauBxCollection::new(-2, 2);
            for (i, c) in data[2..].chunks_exact(6).enumerate() {
                let bx = (c[0] % 5) as i32 - 2;
                let t = Tau::new(
                    i32::from_le_bytes([c[1], c[2], 0, 0]),
                    c[3] as i8 as i32,
                    c[4] as i32,
                    (c[5] & 0x3) as i32,
                    (i % 8) as i32,
                );
                let _ = taus.push(bx, t);
            }
            let links = pack_links(&taus, &cfg);
            assert_eq!(links.link1.len(), 5 * cfg.n_output_frame_per_bx());
            assert_eq!(links.link2.len(), links.link1.len());
            let _ = unpack_links(&links);
        });
    }
}
