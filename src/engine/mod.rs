// ==========================================
// 条码装箱系统 - 引擎层
// ==========================================
// 职责: 装箱与序列号分配（纯计算，无 I/O，无跨调用状态）
// 流程: 分类器 → 单品整箱 → 尾数合箱 → 编排器拼接
// ==========================================

pub mod assembler;
pub mod carton_filler;
pub mod classifier;
pub mod labeling;
pub mod manifest;
pub mod remainder_mixer;

// 重导出核心引擎
pub use assembler::{group_by_bucket, pack, BucketGroup, CartonAssembler};
pub use carton_filler::{CartonFiller, FillResult, Remainder};
pub use classifier::TypeClassifier;
pub use labeling::{carton_label, label_cartons, parse_unit_barcode, unit_barcode, LabeledCarton};
pub use manifest::{
    summarize, summarize_locations, BucketSummary, LocationSummary, PackingManifest,
    ProductItemCount,
};
pub use remainder_mixer::{MixBuffer, MixTransition, RemainderMixer};
