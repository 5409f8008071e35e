/// 外部から与えられる文字列ベースの ID 型を定義する宣言型マクロ
///
/// オーナー ID や注文 ID はトリガー元（ドキュメントパス）から渡される
/// 不透明な文字列であり、このシステムでは採番しない。
///
/// 以下のボイラープレートを一括生成する:
/// - Newtype 構造体（`String` をラップ）
/// - `derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)`
/// - `new()`: 任意の文字列から作成
/// - `as_str()`: 内部文字列への参照
///
/// # 使用例
///
/// ```rust
/// use orderflow_domain::order::OrderId;
///
/// let id = OrderId::new("42");
/// assert_eq!(id.as_str(), "42");
/// assert_eq!(id.to_string(), "42");
/// ```
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident;
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash,
            serde::Serialize, serde::Deserialize,
            derive_more::Display,
        )]
        #[serde(transparent)]
        #[display("{_0}")]
        $vis struct $Name(String);

        impl $Name {
            /// 文字列から ID を作成する
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// 文字列参照を取得する
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }
    };
}
