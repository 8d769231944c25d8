#![deny(clippy::all, clippy::pedantic)]

use gratiswag_admin::{
    application::{
        forms::{FormSyncView, ProductForm},
        routes::AdminRoute,
    },
    domain::{ids::RecordId, mutation::PendingMutation},
    infra::http::resources::{CategoriesApi, ProductsApi},
    presentation::table::render_rows,
};

use crate::args::{OutputFormat, ProductFields, ProductsCmd};
use crate::client::{CliError, Ctx};
use crate::handlers::{forms, lists::Screen};
use crate::io::read_opt_value;
use crate::print::{print_json, print_record, print_text};

pub async fn handle(ctx: &Ctx, cmd: ProductsCmd) -> Result<(), CliError> {
    let api = ProductsApi::new(ctx.client());
    match cmd {
        ProductsCmd::List(paging) => screen(api).show(ctx, paging.page).await,
        ProductsCmd::Show { id } => {
            ctx.require_session(AdminRoute::Products)?;
            let product = api.get(&RecordId::new(id)?).await?;
            print_record(ctx, &product)
        }
        ProductsCmd::Create(fields) => {
            ctx.require_session(AdminRoute::Products)?;
            let image = fields.image.clone();
            let view = FormSyncView::new(product_form(fields, None).await?, ctx.max_image_bytes());
            forms::submit(ctx, view, image.as_deref(), &api.create_target()).await
        }
        ProductsCmd::Update { id, fields } => {
            ctx.require_session(AdminRoute::Products)?;
            let id = RecordId::new(id)?;
            let current = api.get(&id).await?;
            let image = fields.image.clone();
            let form = product_form(fields, Some(current.description)).await?;
            let view = FormSyncView::editing(form, current.product_image, ctx.max_image_bytes());
            forms::submit(ctx, view, image.as_deref(), &api.update_target(&id)).await
        }
        ProductsCmd::Delete { id, page, confirm } => {
            let mutation = PendingMutation::delete(RecordId::new(id)?);
            screen(api).act(ctx, page.page, mutation, confirm.yes).await
        }
        ProductsCmd::Categories => {
            ctx.require_session(AdminRoute::Products)?;
            let choices = CategoriesApi::new(ctx.client()).choices().await?;
            match ctx.output {
                OutputFormat::Json => print_json(&choices),
                OutputFormat::Table => {
                    let footer = format!("{} to choose from", choices.len());
                    print_text(&render_rows("categories", &choices, footer)?);
                    Ok(())
                }
            }
        }
    }
}

async fn product_form(
    fields: ProductFields,
    current_description: Option<String>,
) -> Result<ProductForm, CliError> {
    let description = read_opt_value(fields.description, fields.description_file)
        .await?
        .or(current_description)
        .unwrap_or_default();
    Ok(ProductForm {
        title: fields.title,
        description,
        price: fields.price,
        quantity: fields.quantity,
        category: fields.category,
    })
}

fn screen(api: ProductsApi) -> Screen<ProductsApi> {
    Screen::new(AdminRoute::Products, "products", api)
}
