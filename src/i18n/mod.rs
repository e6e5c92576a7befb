//! 多语言错误消息模块
//!
//! 使用rat_embed_lang框架提供统一的错误消息多语言支持

use std::collections::HashMap;
use once_cell::sync::OnceCell;
use rat_embed_lang::register_translations;

/// 重新导出rat_embed_lang的核心函数
pub use rat_embed_lang::set_language;

static TRANSLATIONS_REGISTERED: OnceCell<()> = OnceCell::new();

/// 获取翻译文本，首次使用时注册本库的翻译
pub fn t(key: &str) -> String {
    ErrorMessageI18n::ensure_registered();
    rat_embed_lang::t(key)
}

/// 获取参数化翻译文本，首次使用时注册本库的翻译
pub fn tf(key: &str, args: &[(&str, &str)]) -> String {
    ErrorMessageI18n::ensure_registered();
    rat_embed_lang::tf(key, args)
}

/// 错误消息翻译注册器
pub struct ErrorMessageI18n;

impl ErrorMessageI18n {
    /// 注册所有错误消息翻译
    fn register_all_translations() {
        let mut translations = HashMap::new();

        let mut not_loaded = HashMap::new();
        not_loaded.insert("zh-CN".to_string(), "缓存尚未加载，服务预热中".to_string());
        not_loaded.insert("en-US".to_string(), "Cache not loaded yet, service warming up".to_string());
        not_loaded.insert("ja-JP".to_string(), "キャッシュはまだロードされていません（ウォームアップ中）".to_string());
        translations.insert("error.not_loaded".to_string(), not_loaded);

        let mut not_found = HashMap::new();
        not_found.insert("zh-CN".to_string(), "未找到{entity}: {key}".to_string());
        not_found.insert("en-US".to_string(), "{entity} not found: {key}".to_string());
        not_found.insert("ja-JP".to_string(), "{entity} が見つかりません: {key}".to_string());
        translations.insert("error.not_found".to_string(), not_found);

        let mut structural_load = HashMap::new();
        structural_load.insert("zh-CN".to_string(), "加载数据结构不一致，已放弃本次加载: {message}".to_string());
        structural_load.insert("en-US".to_string(), "Structural load error, load aborted: {message}".to_string());
        structural_load.insert("ja-JP".to_string(), "構造的なロードエラーのためロードを中止しました: {message}".to_string());
        translations.insert("error.structural_load".to_string(), structural_load);

        let mut duplicate_id = HashMap::new();
        duplicate_id.insert("zh-CN".to_string(), "{entity} 主键 {id} 重复 (位置 {first} 与 {second})".to_string());
        duplicate_id.insert("en-US".to_string(), "Duplicate {entity} id {id} (rows {first} and {second})".to_string());
        duplicate_id.insert("ja-JP".to_string(), "{entity} の ID {id} が重複しています (行 {first} と {second})".to_string());
        translations.insert("error.duplicate_id".to_string(), duplicate_id);

        let mut duplicate_name = HashMap::new();
        duplicate_name.insert("zh-CN".to_string(), "{entity} 名称 '{name}' 重复 (ID {first} 与 {second})".to_string());
        duplicate_name.insert("en-US".to_string(), "Duplicate {entity} name '{name}' (ids {first} and {second})".to_string());
        duplicate_name.insert("ja-JP".to_string(), "{entity} の名前 '{name}' が重複しています (ID {first} と {second})".to_string());
        translations.insert("error.duplicate_name".to_string(), duplicate_name);

        let mut empty_class_set = HashMap::new();
        empty_class_set.insert("zh-CN".to_string(), "加载器返回成功但字段类列表为空".to_string());
        empty_class_set.insert("en-US".to_string(), "Loader reported success but returned no field classes".to_string());
        empty_class_set.insert("ja-JP".to_string(), "ローダーは成功を返しましたがフィールドクラスが空です".to_string());
        translations.insert("error.empty_class_set".to_string(), empty_class_set);

        let mut loader_errors = HashMap::new();
        loader_errors.insert("zh-CN".to_string(), "加载器读取失败: {message}".to_string());
        loader_errors.insert("en-US".to_string(), "Loader failed: {message}".to_string());
        loader_errors.insert("ja-JP".to_string(), "ローダーの読み込みに失敗しました: {message}".to_string());
        translations.insert("error.loader".to_string(), loader_errors);

        let mut config_errors = HashMap::new();
        config_errors.insert("zh-CN".to_string(), "配置错误: {message}".to_string());
        config_errors.insert("en-US".to_string(), "Configuration error: {message}".to_string());
        config_errors.insert("ja-JP".to_string(), "設定エラー: {message}".to_string());
        translations.insert("error.config".to_string(), config_errors);

        let mut serialization_errors = HashMap::new();
        serialization_errors.insert("zh-CN".to_string(), "数据序列化失败: {message}".to_string());
        serialization_errors.insert("en-US".to_string(), "Data serialization failed: {message}".to_string());
        serialization_errors.insert("ja-JP".to_string(), "データシリアライズが失敗しました: {message}".to_string());
        translations.insert("error.serialization".to_string(), serialization_errors);

        let mut dataset_dir_missing = HashMap::new();
        dataset_dir_missing.insert("zh-CN".to_string(), "数据集目录不存在: {path}".to_string());
        dataset_dir_missing.insert("en-US".to_string(), "Dataset directory does not exist: {path}".to_string());
        dataset_dir_missing.insert("ja-JP".to_string(), "データセットディレクトリが存在しません: {path}".to_string());
        translations.insert("error.dataset_dir_missing".to_string(), dataset_dir_missing);

        let mut dataset_not_found = HashMap::new();
        dataset_not_found.insert("zh-CN".to_string(), "目录 {path} 中没有匹配的数据集文件".to_string());
        dataset_not_found.insert("en-US".to_string(), "No dataset files found in {path}".to_string());
        dataset_not_found.insert("ja-JP".to_string(), "{path} にデータセットファイルが見つかりません".to_string());
        translations.insert("error.dataset_not_found".to_string(), dataset_not_found);

        // 注册所有翻译
        register_translations(translations);
    }

    /// 确保翻译只注册一次，不改变当前语言
    pub fn ensure_registered() {
        TRANSLATIONS_REGISTERED.get_or_init(Self::register_all_translations);
    }

    /// 初始化错误消息多语言支持
    pub fn init() {
        Self::ensure_registered();

        // 从环境变量获取语言设置，默认为zh-CN
        let lang = std::env::var("RAT_LANG")
            .or_else(|_| std::env::var("LANG"))
            .unwrap_or_else(|_| "zh-CN".to_string());

        // 标准化语言代码
        use rat_embed_lang::normalize_language_code;
        let normalized_lang = normalize_language_code(&lang);
        set_language(&normalized_lang);
    }
}
