//! 許可リスト射影のプロパティテスト

use super::*;
use crate::definition::ImportMapping;
use proptest::prelude::*;

/// 定義名に使える文字列
fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,19}".prop_map(|s| s)
}

/// 任意のスカラーフィールド
fn opt_string_strategy() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[a-zA-Z0-9 ./_-]{1,20}")
}

fn mapping_strategy() -> impl Strategy<Value = ImportMapping> {
    (
        opt_string_strategy(),
        opt_string_strategy(),
        any::<bool>(),
        opt_string_strategy(),
    )
        .prop_map(|(from_column, to_column, primary_identifier, setter)| ImportMapping {
            from_column,
            to_column,
            primary_identifier,
            setter,
            ..Default::default()
        })
}

fn definition_strategy() -> impl Strategy<Value = ImportDefinition> {
    (
        name_strategy(),
        opt_string_strategy(),
        opt_string_strategy(),
        opt_string_strategy(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        proptest::collection::vec(mapping_strategy(), 0..4),
    )
        .prop_map(
            |(name, provider, class, object_path, stop, skip_existing, force, mapping)| {
                let mut definition = ImportDefinition::new(name);
                definition.provider = provider;
                definition.class = class;
                definition.object_path = object_path;
                definition.stop_on_exception = stop;
                definition.skip_existing_objects = skip_existing;
                definition.force_load_object = force;
                definition.mapping = mapping;
                definition
            },
        )
}

proptest! {
    /// 射影 → バッグ → 復元の往復で許可リストのフィールドが保たれる
    #[test]
    fn prop_projection_round_trips(definition in definition_strategy()) {
        let projected = record::project(&definition);
        let bag = record::to_bag(&projected).unwrap();
        let restored = record::from_bag(&bag).unwrap();
        let hydrated = record::hydrate(&restored, definition.name());

        prop_assert_eq!(record::project(&hydrated), projected);
        prop_assert_eq!(hydrated.name(), definition.name());
        prop_assert_eq!(&hydrated.mapping, &definition.mapping);
    }

    /// 空のマッピングは永続化バッグからキーごと消える
    #[test]
    fn prop_empty_mapping_is_omitted(
        name in name_strategy(),
        provider in opt_string_strategy()
    ) {
        let mut definition = ImportDefinition::new(name);
        definition.provider = provider;

        let bag = record::to_bag(&record::project(&definition)).unwrap();

        prop_assert!(bag.get("mapping").is_none());
    }
}
