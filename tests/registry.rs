use taupack::constants::{CALO_TAU_PACKER, GT_TAU_PACKER};
use taupack::{
    Block, BlockHeader, DemuxConfig, Packer, PackerRegistry, Tau, TauBxCollection, TauPackError,
    TauPacker,
};

fn one_bx(taus: &[Tau]) -> TauBxCollection {
    let mut c = TauBxCollection::new(0, 0);
    for t in taus {
        c.push(0, *t).unwrap();
    }
    c
}

#[test]
fn defaults_hold_both_tau_packers() {
    let reg = PackerRegistry::with_defaults(DemuxConfig::default());
    assert_eq!(reg.len(), 2);
    assert_eq!(reg.names(), vec![CALO_TAU_PACKER, GT_TAU_PACKER]);
    assert!(reg.get(GT_TAU_PACKER).is_some());
    assert!(reg.get("stage2::EGammaPacker").is_none());
}

#[test]
fn gt_and_calo_use_their_block_ids() {
    let reg = PackerRegistry::with_defaults(DemuxConfig::new(1, 2).unwrap());
    let taus = one_bx(&[Tau::new(7, 0, 0, 0, 0), Tau::new(9, 0, 0, 0, 0)]);

    let gt = reg.get(GT_TAU_PACKER).unwrap().pack(&taus).unwrap();
    assert_eq!(
        gt,
        vec![
            Block::new(16, vec![7, 0]).unwrap(),
            Block::new(18, vec![9, 0]).unwrap()
        ]
    );

    let calo = reg.get(CALO_TAU_PACKER).unwrap().pack(&taus).unwrap();
    assert_eq!(calo.iter().map(Block::id).collect::<Vec<_>>(), vec![17, 19]);
    assert_eq!(
        calo[0].header,
        BlockHeader {
            id: 17,
            size: 2,
            cap_id: 0,
            flags: 0
        }
    );
}

#[test]
fn duplicate_registration_fails() {
    let mut reg = PackerRegistry::new();
    assert!(reg.is_empty());
    reg.register(Box::new(TauPacker::gt(DemuxConfig::default())))
        .unwrap();
    let err = reg
        .register(Box::new(TauPacker::gt(DemuxConfig::default())))
        .unwrap_err();
    assert!(matches!(err, TauPackError::DuplicatePacker(name) if name == GT_TAU_PACKER));
}

#[test]
fn custom_packer_can_be_registered() {
    let mut reg = PackerRegistry::new();
    let custom = TauPacker::new("test::TauPacker", 40, 42, DemuxConfig::new(3, 3).unwrap());
    assert_eq!(custom.block_ids(), (40, 42));
    reg.register(Box::new(custom)).unwrap();
    let (blocks, stats) = reg
        .require("test::TauPacker")
        .unwrap()
        .pack_with_stats(&one_bx(&[Tau::new(1, 1, 1, 1, 1)]))
        .unwrap();
    assert_eq!(blocks[0].payload.len(), 3);
    assert_eq!(stats.real_words, 1);
    assert!(matches!(
        reg.require("missing"),
        Err(TauPackError::UnknownPacker(_))
    ));
}

#[test]
fn long_events_overflow_the_block_header() {
    let gt = TauPacker::gt(DemuxConfig::default());
    // 42 crossings x 6 frames = 252 words still fit
    assert!(gt.pack(&TauBxCollection::new(0, 41)).is_ok());
    let err = gt.pack(&TauBxCollection::new(0, 42)).unwrap_err();
    assert!(matches!(
        err,
        TauPackError::BlockOverflow {
            id: 16,
            words: 258
        }
    ));
}
