//! Ports - 抽象化レイヤー
//!
//! このモジュールは Hexagonal Architecture の「ポート」を定義します。
//! 各 trait は外部リソース（時刻、ID 生成、通知）へのインターフェースを
//! 提供し、実装の詳細を隠蔽します。ストレージポート（AssignmentStore）は
//! `crate::store` にあります。

pub mod clock;
pub mod event_sink;
pub mod id_generator;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::event_sink::{CollectingEventSink, EventSink, NullEventSink, TracingEventSink};
pub use self::id_generator::{IdGenerator, UlidGenerator};
