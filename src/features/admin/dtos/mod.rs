pub mod admin_dtos;

pub use admin_dtos::{
    AddPageQuery, AddViewDto, EditViewDto, FormDto, ListViewDto, MapPreviewDto, MetaDto,
    PointRowDto, PointSubmission,
};
