use crate::domain::catalog::Catalog;
use crate::utils::error::Result;

/// 啟動時提供鍵盤目錄的來源
pub trait CatalogSource {
    fn load(&self) -> Result<Catalog>;

    /// 日誌用的來源名稱
    fn describe(&self) -> String;
}

/// 對話紀錄等輸出檔案的寫入位置
pub trait Storage {
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}
