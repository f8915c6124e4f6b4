//! Template sources bundled into the binary.
//!
//! Names are paths relative to `templates/`, which is also how templates
//! refer to each other in `{% include %}`.

/// Every bundled template as `(name, source)`.
pub const TEMPLATES: &[(&str, &str)] = &[
    ("backend_node/express/server.j2", include_str!("../templates/backend_node/express/server.j2")),
    ("backend_node/fastify/server.j2", include_str!("../templates/backend_node/fastify/server.j2")),
    ("backend_node/hapi/server.j2", include_str!("../templates/backend_node/hapi/server.j2")),
    ("backend_node/koa/server.j2", include_str!("../templates/backend_node/koa/server.j2")),
    ("backend_node/nest/app.controller.ts.j2", include_str!("../templates/backend_node/nest/app.controller.ts.j2")),
    ("backend_node/nest/app.module.ts.j2", include_str!("../templates/backend_node/nest/app.module.ts.j2")),
    ("backend_node/nest/app.service.ts.j2", include_str!("../templates/backend_node/nest/app.service.ts.j2")),
    ("backend_node/nest/main.ts.j2", include_str!("../templates/backend_node/nest/main.ts.j2")),
    ("backend_node/nest/todo.dto.ts.j2", include_str!("../templates/backend_node/nest/todo.dto.ts.j2")),
    ("backend_node/shutdown.j2", include_str!("../templates/backend_node/shutdown.j2")),
    ("backend_node/todo_store.j2", include_str!("../templates/backend_node/todo_store.j2")),
    ("backend_python/blueprint/config.py.j2", include_str!("../templates/backend_python/blueprint/config.py.j2")),
    ("backend_python/blueprint/init.py.j2", include_str!("../templates/backend_python/blueprint/init.py.j2")),
    ("backend_python/blueprint/main.py.j2", include_str!("../templates/backend_python/blueprint/main.py.j2")),
    ("backend_python/blueprint/routes_main.py.j2", include_str!("../templates/backend_python/blueprint/routes_main.py.j2")),
    ("backend_python/blueprint/routes_todos.py.j2", include_str!("../templates/backend_python/blueprint/routes_todos.py.j2")),
    ("backend_python/django/api_urls.py.j2", include_str!("../templates/backend_python/django/api_urls.py.j2")),
    ("backend_python/django/apps.py.j2", include_str!("../templates/backend_python/django/apps.py.j2")),
    ("backend_python/django/asgi.py.j2", include_str!("../templates/backend_python/django/asgi.py.j2")),
    ("backend_python/django/manage.py.j2", include_str!("../templates/backend_python/django/manage.py.j2")),
    ("backend_python/django/settings.py.j2", include_str!("../templates/backend_python/django/settings.py.j2")),
    ("backend_python/django/urls.py.j2", include_str!("../templates/backend_python/django/urls.py.j2")),
    ("backend_python/django/views.py.j2", include_str!("../templates/backend_python/django/views.py.j2")),
    ("backend_python/django/wsgi.py.j2", include_str!("../templates/backend_python/django/wsgi.py.j2")),
    ("backend_python/fastapi/config.py.j2", include_str!("../templates/backend_python/fastapi/config.py.j2")),
    ("backend_python/fastapi/main.py.j2", include_str!("../templates/backend_python/fastapi/main.py.j2")),
    ("backend_python/fastapi/todo.py.j2", include_str!("../templates/backend_python/fastapi/todo.py.j2")),
    ("backend_python/fastapi/todos.py.j2", include_str!("../templates/backend_python/fastapi/todos.py.j2")),
    ("backend_python/gitignore.j2", include_str!("../templates/backend_python/gitignore.j2")),
    ("backend_python/start_server.sh.j2", include_str!("../templates/backend_python/start_server.sh.j2")),
    ("common/README.md.j2", include_str!("../templates/common/README.md.j2")),
    ("common/env.j2", include_str!("../templates/common/env.j2")),
    ("common/gitignore.j2", include_str!("../templates/common/gitignore.j2")),
    ("common/rollup.config.j2", include_str!("../templates/common/rollup.config.j2")),
    ("common/vite.config.j2", include_str!("../templates/common/vite.config.j2")),
    ("common/webpack.config.j2", include_str!("../templates/common/webpack.config.j2")),
    ("database/node/index.j2", include_str!("../templates/database/node/index.j2")),
    ("database/node/mongodb.j2", include_str!("../templates/database/node/mongodb.j2")),
    ("database/node/mysql.j2", include_str!("../templates/database/node/mysql.j2")),
    ("database/node/postgresql.j2", include_str!("../templates/database/node/postgresql.j2")),
    ("database/node/redis.j2", include_str!("../templates/database/node/redis.j2")),
    ("database/node/sqlite.j2", include_str!("../templates/database/node/sqlite.j2")),
    ("database/python/django.py.j2", include_str!("../templates/database/python/django.py.j2")),
    ("database/python/mongodb.py.j2", include_str!("../templates/database/python/mongodb.py.j2")),
    ("database/python/redis.py.j2", include_str!("../templates/database/python/redis.py.j2")),
    ("database/python/sqlalchemy.py.j2", include_str!("../templates/database/python/sqlalchemy.py.j2")),
    ("deployment/Dockerfile.backend.node.j2", include_str!("../templates/deployment/Dockerfile.backend.node.j2")),
    ("deployment/Dockerfile.backend.python.j2", include_str!("../templates/deployment/Dockerfile.backend.python.j2")),
    ("deployment/Dockerfile.frontend.j2", include_str!("../templates/deployment/Dockerfile.frontend.j2")),
    ("deployment/deploy_frontend_s3.sh.j2", include_str!("../templates/deployment/deploy_frontend_s3.sh.j2")),
    ("deployment/docker-compose.yml.j2", include_str!("../templates/deployment/docker-compose.yml.j2")),
    ("deployment/dockerignore.j2", include_str!("../templates/deployment/dockerignore.j2")),
    ("deployment/netlify.toml.j2", include_str!("../templates/deployment/netlify.toml.j2")),
    ("deployment/netlify_function.j2", include_str!("../templates/deployment/netlify_function.j2")),
    ("deployment/netlify_function.py.j2", include_str!("../templates/deployment/netlify_function.py.j2")),
    ("deployment/nginx.conf.j2", include_str!("../templates/deployment/nginx.conf.j2")),
    ("deployment/nodecommands.config.j2", include_str!("../templates/deployment/nodecommands.config.j2")),
    ("deployment/python.config.j2", include_str!("../templates/deployment/python.config.j2")),
    ("frontend/angular/app.component.ts.j2", include_str!("../templates/frontend/angular/app.component.ts.j2")),
    ("frontend/angular/main.ts.j2", include_str!("../templates/frontend/angular/main.ts.j2")),
    ("frontend/index.html.j2", include_str!("../templates/frontend/index.html.j2")),
    ("frontend/react/App.j2", include_str!("../templates/frontend/react/App.j2")),
    ("frontend/react/main.j2", include_str!("../templates/frontend/react/main.j2")),
    ("frontend/solid/App.j2", include_str!("../templates/frontend/solid/App.j2")),
    ("frontend/solid/index.j2", include_str!("../templates/frontend/solid/index.j2")),
    ("frontend/svelte/App.svelte.j2", include_str!("../templates/frontend/svelte/App.svelte.j2")),
    ("frontend/svelte/main.j2", include_str!("../templates/frontend/svelte/main.j2")),
    ("frontend/vanilla/main.j2", include_str!("../templates/frontend/vanilla/main.j2")),
    ("frontend/vue/App.vue.j2", include_str!("../templates/frontend/vue/App.vue.j2")),
    ("frontend/vue/main.j2", include_str!("../templates/frontend/vue/main.j2")),
    ("stylesheet/postcss.config.j2", include_str!("../templates/stylesheet/postcss.config.j2")),
    ("stylesheet/style.css.j2", include_str!("../templates/stylesheet/style.css.j2")),
    ("stylesheet/style.scss.j2", include_str!("../templates/stylesheet/style.scss.j2")),
    ("stylesheet/tailwind.css.j2", include_str!("../templates/stylesheet/tailwind.css.j2")),
    ("ui/button.j2", include_str!("../templates/ui/button.j2")),
    ("ui/theme.j2", include_str!("../templates/ui/theme.j2")),
    ("ui/utils.j2", include_str!("../templates/ui/utils.j2")),
];
